//! Liveness and model status.

use axum::{extract::State, Json};
use abalone_common::HealthResponse;
use crate::state::SharedState;

/// GET /health
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(state.predictor.is_loaded()))
}
