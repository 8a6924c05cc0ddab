//! Age prediction endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::error;
use abalone_common::{error::ApiError, MeasurementPayload, PredictionResult};
use crate::state::SharedState;

/// POST /predict — Predict abalone age from physical measurements
///
/// Malformed or out-of-range bodies are rejected with 422. An unknown sex
/// code and any failure inside the trained-model path are reported as 400.
pub async fn predict_abalone_age(
    State(state): State<SharedState>,
    payload: Result<Json<MeasurementPayload>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;
    let raw = payload.into_measurement()?;

    match state.predictor.predict(&raw) {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("Prediction error: {}", e);
            Err(ApiError::BadRequest(format!("Prediction error: {}", e)))
        }
    }
}
