//! Server configuration.
//!
//! Layered as: built-in defaults, an optional TOML file, then `ABALONE_*`
//! environment variables (with `.env` support). CLI flags are applied on top
//! by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AbaloneError, Result};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "abalone.toml";

pub const ENV_HOST: &str = "ABALONE_HOST";
pub const ENV_PORT: &str = "ABALONE_PORT";
pub const ENV_MODELS_DIR: &str = "ABALONE_MODELS_DIR";
pub const ENV_LOG_LEVEL: &str = "ABALONE_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the exported model artifacts (default: ./models)
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Fallback log filter when RUST_LOG is unset (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_models_dir() -> PathBuf { PathBuf::from("./models") }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            models_dir: default_models_dir(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolve configuration from file and process environment.
    ///
    /// An explicit `path` must exist. Without one, `abalone.toml` in the
    /// working directory is used if present. Also returns the `.env` file that
    /// was read, if any, so the caller can report it once logging is up.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        let env_file = dotenvy::dotenv().ok();

        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok((config, env_file))
    }

    /// Override fields from an environment lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse().map_err(|_| {
                AbaloneError::Config(format!("{} must be a valid port number, got '{}'", ENV_PORT, port))
            })?;
        }
        if let Some(dir) = lookup(ENV_MODELS_DIR) {
            self.models_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        Ok(())
    }

    /// `host:port` string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
