//! Prediction dispatch between the trained model and the heuristic.

use abalone_common::{ModelStatus, PredictionResult, RawMeasurement};
use tracing::debug;

use crate::artifacts::{ArtifactState, ModelArtifacts};
use crate::error::{ModelError, Result};
use crate::features::{feature_vector, FeatureVector, FEATURE_COLUMNS};
use crate::mock::mock_rings;
use crate::regressor::Regressor;

/// Encode sex and build the 15-column model input.
pub fn build_feature_vector(artifacts: &ModelArtifacts, raw: &RawMeasurement) -> Result<FeatureVector> {
    let encoded_sex = artifacts.label_encoder.encode(raw.sex)?;
    Ok(feature_vector(encoded_sex, raw))
}

/// Run one measurement through encoder, scaler and regressor.
pub fn predict_with_artifacts(artifacts: &ModelArtifacts, raw: &RawMeasurement) -> Result<f64> {
    let features = build_feature_vector(artifacts, raw)?;
    debug!("Feature vector length: {}", features.len());

    for (value, column) in features.iter().zip(FEATURE_COLUMNS) {
        if !value.is_finite() {
            return Err(ModelError::NonFinite(column));
        }
    }

    let scaled = artifacts.scaler.transform(&features)?;
    let rings = artifacts.regressor.predict_one(&scaled)?;
    if !rings.is_finite() {
        return Err(ModelError::NonFinite("prediction"));
    }
    Ok(rings)
}

/// Holds the startup artifact state and answers prediction requests.
#[derive(Debug, Clone)]
pub struct Predictor {
    state: ArtifactState,
}

impl Predictor {
    pub fn new(state: ArtifactState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ArtifactState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    pub fn status(&self) -> ModelStatus {
        self.state.status()
    }

    /// Predict rings and age. Errors only come from the trained-model path.
    pub fn predict(&self, raw: &RawMeasurement) -> Result<PredictionResult> {
        let rings = match self.state.artifacts() {
            Some(artifacts) => {
                debug!("Using trained model for prediction");
                predict_with_artifacts(artifacts, raw)?
            }
            None => {
                debug!("Using mock prediction (model not loaded)");
                mock_rings(raw)
            }
        };
        Ok(PredictionResult::from_rings(rings, self.status()))
    }
}
