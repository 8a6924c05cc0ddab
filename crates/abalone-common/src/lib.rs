//! abalone-common — Shared types, errors, and configuration used across all abalone crates.

pub mod error;
pub mod entities;
pub mod server_config;

// Re-export commonly used types
pub use entities::{HealthResponse, MeasurementPayload, ModelStatus, PredictionResult, RawMeasurement, Sex};
pub use server_config::ServerConfig;
