//! Shared application state for the web server.

use std::path::Path;
use std::sync::Arc;

use abalone_model::{ArtifactState, Predictor};

/// Shared state injected into every Axum handler.
///
/// Built once before the listener starts and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    pub predictor: Predictor,
}

impl AppState {
    pub fn new(artifacts: ArtifactState) -> Self {
        Self { predictor: Predictor::new(artifacts) }
    }

    /// Load artifacts from `models_dir`, falling back to mock mode on failure.
    pub fn load(models_dir: &Path) -> Self {
        Self::new(ArtifactState::load(models_dir))
    }
}

pub type SharedState = Arc<AppState>;
