//! Model artifact store.
//!
//! The five artifacts exported by the training notebook are loaded together
//! at startup. Any failure discards whatever was already read and leaves the
//! service in mock mode; there is no partially loaded state.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use abalone_common::ModelStatus;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::encoder::LabelEncoder;
use crate::error::{ModelError, Result};
use crate::features::FEATURE_COLUMNS;
use crate::regressor::RegressorArtifact;
use crate::scaler::FeatureScaler;

pub const REGRESSOR_FILE: &str = "best_abalone_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";
pub const METADATA_FILE: &str = "model_metadata.json";

/// Descriptive information written alongside the model by the training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default)]
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    /// Any further keys, kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The complete, immutable set of trained artifacts.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub regressor: RegressorArtifact,
    pub scaler: FeatureScaler,
    pub label_encoder: LabelEncoder,
    pub feature_columns: Vec<String>,
    pub metadata: ModelMetadata,
}

impl ModelArtifacts {
    /// Read and check all five artifacts from `dir`, stopping at the first failure.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let regressor: RegressorArtifact = read_artifact(dir, REGRESSOR_FILE, "regressor")?;
        regressor.validate()?;
        info!("Model loaded ({})", regressor.kind());

        let scaler: FeatureScaler = read_artifact(dir, SCALER_FILE, "scaler")?;
        scaler.validate()?;
        info!("Scaler loaded");

        let label_encoder: LabelEncoder = read_artifact(dir, LABEL_ENCODER_FILE, "label encoder")?;
        label_encoder.validate()?;
        info!("Label encoder loaded");

        let feature_columns: Vec<String> = read_artifact(dir, FEATURE_COLUMNS_FILE, "feature columns")?;
        check_feature_columns(&feature_columns)?;
        info!("Feature columns loaded");

        let metadata: ModelMetadata = read_artifact(dir, METADATA_FILE, "model metadata")?;
        info!("Model metadata loaded");

        Ok(Self { regressor, scaler, label_encoder, feature_columns, metadata })
    }
}

fn read_artifact<T: DeserializeOwned>(dir: &Path, file: &str, artifact: &'static str) -> Result<T> {
    let path = dir.join(file);
    let content = fs::read_to_string(&path).map_err(|source| ModelError::Read { artifact, source })?;
    serde_json::from_str(&content).map_err(|source| ModelError::Parse { artifact, source })
}

fn check_feature_columns(columns: &[String]) -> Result<()> {
    if columns.len() != FEATURE_COLUMNS.len() {
        return Err(ModelError::invalid(
            "feature columns",
            format!("expected {} columns, found {}", FEATURE_COLUMNS.len(), columns.len()),
        ));
    }
    for (i, (got, want)) in columns.iter().zip(FEATURE_COLUMNS.iter()).enumerate() {
        if got != want {
            return Err(ModelError::invalid(
                "feature columns",
                format!("column {} is '{}', expected '{}'", i, got, want),
            ));
        }
    }
    Ok(())
}

/// Outcome of the startup load.
#[derive(Debug, Clone)]
pub enum ArtifactState {
    Loaded(Arc<ModelArtifacts>),
    Unloaded { reason: String },
}

impl ArtifactState {
    /// Load artifacts from `dir`. Never fails: errors produce `Unloaded`.
    pub fn load(dir: &Path) -> Self {
        info!("Attempting to load model artifacts from {:?}", dir);
        match ModelArtifacts::load_from_dir(dir) {
            Ok(artifacts) => {
                info!(
                    model = %artifacts.metadata.model_name,
                    "All model artifacts loaded successfully"
                );
                ArtifactState::Loaded(Arc::new(artifacts))
            }
            Err(e) => {
                warn!("Error loading model: {}", e);
                warn!("API will run in mock mode - returning heuristic predictions");
                ArtifactState::Unloaded { reason: e.to_string() }
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ArtifactState::Loaded(_))
    }

    pub fn artifacts(&self) -> Option<&ModelArtifacts> {
        match self {
            ArtifactState::Loaded(a) => Some(a.as_ref()),
            ArtifactState::Unloaded { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ArtifactState::Loaded(_) => None,
            ArtifactState::Unloaded { reason } => Some(reason.as_str()),
        }
    }

    pub fn status(&self) -> ModelStatus {
        if self.is_loaded() {
            ModelStatus::Loaded
        } else {
            ModelStatus::Mock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regressor::Regressor;
    use abalone_test_utils::artifacts::identity_scaler;
    use abalone_test_utils::ArtifactFixture;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_load_complete_set() {
        let dir = ArtifactFixture::new().write().unwrap();
        let state = ArtifactState::load(dir.path());

        assert!(state.is_loaded());
        assert_eq!(state.status(), ModelStatus::Loaded);
        assert!(state.reason().is_none());

        let artifacts = state.artifacts().unwrap();
        assert_eq!(artifacts.regressor.n_features(), 15);
        assert_eq!(artifacts.scaler.n_features(), 15);
        assert_eq!(artifacts.label_encoder.classes, vec!["F", "I", "M"]);
        assert_eq!(artifacts.feature_columns.len(), 15);
        assert_eq!(artifacts.metadata.model_name, "fixture-linear");
        assert_eq!(artifacts.metadata.metrics.get("rmse"), Some(&2.1));
        assert!(artifacts.metadata.trained_at.is_some());
        assert_eq!(artifacts.metadata.extra.get("n_training_rows"), Some(&json!(4177)));
    }

    #[test]
    fn test_missing_directory() {
        let state = ArtifactState::load(Path::new("/nonexistent/models"));
        assert!(!state.is_loaded());
        assert_eq!(state.status(), ModelStatus::Mock);
        assert!(state.reason().unwrap().contains("regressor"));
    }

    #[test]
    fn test_any_missing_file_discards_everything() {
        for file in [REGRESSOR_FILE, SCALER_FILE, LABEL_ENCODER_FILE, FEATURE_COLUMNS_FILE, METADATA_FILE] {
            let dir = ArtifactFixture::new().without(file).write().unwrap();
            let state = ArtifactState::load(dir.path());
            assert!(state.artifacts().is_none(), "loaded without {}", file);
        }
    }

    #[test]
    fn test_corrupt_file() {
        let dir = ArtifactFixture::new().corrupt(SCALER_FILE).write().unwrap();
        let err = ModelArtifacts::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::Parse { artifact: "scaler", .. }));
    }

    #[test]
    fn test_structurally_invalid_scaler() {
        let dir = ArtifactFixture::new()
            .with(SCALER_FILE, json!({ "kind": "standard", "mean": [0.0, 0.0], "scale": [1.0] }))
            .write()
            .unwrap();
        let err = ModelArtifacts::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact { artifact: "scaler", .. }));
    }

    #[test]
    fn test_feature_columns_must_match_order() {
        let mut columns: Vec<&str> = FEATURE_COLUMNS.to_vec();
        columns.swap(8, 9);
        let dir = ArtifactFixture::new()
            .with(FEATURE_COLUMNS_FILE, json!(columns))
            .write()
            .unwrap();
        let state = ArtifactState::load(dir.path());
        assert!(state.reason().unwrap().contains("column 8 is 'Density'"));
    }

    #[test]
    fn test_scaler_width_not_checked_at_load() {
        // dimensionality problems surface per request, not at boot
        let dir = ArtifactFixture::new().with(SCALER_FILE, identity_scaler(14)).write().unwrap();
        assert!(ArtifactState::load(dir.path()).is_loaded());
    }

    #[test]
    fn test_metadata_is_lenient() {
        let dir = ArtifactFixture::new().with(METADATA_FILE, json!({})).write().unwrap();
        let state = ArtifactState::load(dir.path());
        assert_eq!(state.artifacts().unwrap().metadata, ModelMetadata::default());
    }
}
