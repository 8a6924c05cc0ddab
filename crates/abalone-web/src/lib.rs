//! abalone-web — HTTP API for abalone age prediction.
//! Provides:
//!   - Health check reporting whether the trained model is loaded
//!   - Age prediction from physical measurements
//!   - Model information (metadata and feature columns)

pub mod router;
pub mod handlers;
pub mod state;
