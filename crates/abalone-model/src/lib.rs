//! Abalone age model
//!
//! Serving-side half of the abalone regression model:
//! - Feature engineering over raw shell measurements
//! - Loading of the exported artifacts (regressor, scaler, label encoder,
//!   feature columns, metadata) as one all-or-nothing set
//! - Prediction through the loaded model, or through a fixed heuristic
//!   when no artifacts are available
//!
//! # Example
//! ```rust,no_run
//! use std::path::Path;
//! use abalone_common::{MeasurementPayload, ModelStatus};
//! use abalone_model::{ArtifactState, Predictor};
//!
//! let predictor = Predictor::new(ArtifactState::load(Path::new("./models")));
//! let raw = MeasurementPayload {
//!     sex: "M".to_string(),
//!     length: 0.595,
//!     diameter: 0.475,
//!     height: 0.15,
//!     whole_weight: 0.9145,
//!     shucked_weight: 0.3755,
//!     viscera_weight: 0.2055,
//!     shell_weight: 0.25,
//! }
//! .into_measurement()
//! .unwrap();
//!
//! let result = predictor.predict(&raw).unwrap();
//! if result.model_status == ModelStatus::Mock {
//!     assert_eq!(result.predicted_rings, 11.0);
//! }
//! ```

pub mod artifacts;
pub mod encoder;
pub mod error;
pub mod features;
pub mod mock;
pub mod predictor;
pub mod regressor;
pub mod scaler;

pub use artifacts::{ArtifactState, ModelArtifacts, ModelMetadata};
pub use error::{ModelError, Result};
pub use features::{engineer, feature_vector, EngineeredFeatures, FeatureVector, FEATURE_COLUMNS, N_FEATURES};
pub use predictor::Predictor;
pub use regressor::Regressor;
