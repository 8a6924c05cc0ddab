//! Error types for artifact loading and prediction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read {artifact}: {source}")]
    Read {
        artifact: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {artifact}: {source}")]
    Parse {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {artifact}: {message}")]
    InvalidArtifact { artifact: &'static str, message: String },

    #[error("y contains previously unseen labels: '{0}'")]
    UnknownLabel(String),

    #[error("X has {got} features, but {component} is expecting {expected} features as input")]
    FeatureMismatch {
        component: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Malformed tree {tree}: {message}")]
    MalformedTree { tree: usize, message: String },

    #[error("Input contains infinity or a value too large: {0} is not finite")]
    NonFinite(&'static str),
}

impl ModelError {
    pub fn invalid(artifact: &'static str, message: impl Into<String>) -> Self {
        ModelError::InvalidArtifact { artifact, message: message.into() }
    }
}
