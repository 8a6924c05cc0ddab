//! Model information: what was loaded at startup, or why nothing was.

use axum::{extract::State, Json};
use serde::Serialize;
use abalone_common::ModelStatus;
use abalone_model::ModelMetadata;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub model_loaded: bool,
    pub model_status: ModelStatus,
    pub feature_columns: Vec<String>,
    pub metadata: Option<ModelMetadata>,
    pub reason: Option<String>,
}

/// GET /model/info
pub async fn model_info(State(state): State<SharedState>) -> Json<ModelInfoResponse> {
    let artifact_state = state.predictor.state();
    let artifacts = artifact_state.artifacts();

    Json(ModelInfoResponse {
        model_loaded: artifact_state.is_loaded(),
        model_status: artifact_state.status(),
        feature_columns: artifacts.map(|a| a.feature_columns.clone()).unwrap_or_default(),
        metadata: artifacts.map(|a| a.metadata.clone()),
        reason: artifact_state.reason().map(str::to_string),
    })
}
