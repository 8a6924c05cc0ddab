//! HTTP handlers for all API routes.

pub mod health;
pub mod model_info;
pub mod predict;
