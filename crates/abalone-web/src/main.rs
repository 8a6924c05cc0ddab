//! Abalone Age Prediction API
//!
//! Run with: cargo run -p abalone-web -- --models-dir ./models

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use abalone_common::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "abalone-web", version, about = "Abalone age prediction API")]
struct Cli {
    /// TOML config file (defaults to ./abalone.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Directory containing the exported model artifacts
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.models_dir {
            config.models_dir = dir;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (mut config, env_file) = ServerConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(path) = env_file {
        debug!("Loaded environment from {:?}", path);
    }
    info!("Starting Abalone Age Prediction API...");

    // Artifacts are loaded before the listener accepts traffic
    let state = abalone_web::state::AppState::load(&config.models_dir);

    // Build router
    let app = abalone_web::router::build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use abalone_common::server_config::{ENV_LOG_LEVEL, ENV_PORT};
    use pretty_assertions::assert_eq;

    fn config_from_env() -> ServerConfig {
        let mut config = ServerConfig::default();
        config
            .apply_env_with(|k| match k {
                ENV_PORT => Some("3001".to_string()),
                ENV_LOG_LEVEL => Some("warn".to_string()),
                _ => None,
            })
            .unwrap();
        config
    }

    #[test]
    fn test_flags_override_env() {
        let mut config = config_from_env();
        let cli = Cli::try_parse_from(["abalone-web", "--port", "9000", "--models-dir", "/srv/models"]).unwrap();
        cli.apply(&mut config);

        assert_eq!(config.port, 9000);
        assert_eq!(config.models_dir, PathBuf::from("/srv/models"));
        // not given on the command line
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = config_from_env();
        Cli::try_parse_from(["abalone-web"]).unwrap().apply(&mut config);
        assert_eq!(config, config_from_env());
    }

    #[test]
    fn test_invalid_port_flag_rejected() {
        assert!(Cli::try_parse_from(["abalone-web", "--port", "eighty"]).is_err());
    }
}
