//! Artifact fixtures.
//!
//! The default fixture is a linear model over an identity standard scaler:
//! `rings = 3.0 + 10.0 * length + 2.0 * whole_weight`.

use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;

pub const REGRESSOR_FILE: &str = "best_abalone_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";
pub const METADATA_FILE: &str = "model_metadata.json";

pub const FEATURE_COLUMNS: [&str; 15] = [
    "Sex",
    "Length",
    "Diameter",
    "Height",
    "Whole_weight",
    "Shucked_weight",
    "Viscera_weight",
    "Shell_weight",
    "Volume",
    "Density",
    "Shell_ratio",
    "Meat_ratio",
    "BMI",
    "Surface_area",
    "Shucked_Viscera_ratio",
];

/// Expected rings for a payload under the default fixture model.
pub fn default_fixture_rings(length: f64, whole_weight: f64) -> f64 {
    3.0 + 10.0 * length + 2.0 * whole_weight
}

/// A set of artifact documents, each of which can be replaced, dropped or corrupted.
#[derive(Debug, Clone)]
pub struct ArtifactFixture {
    files: Vec<(&'static str, Option<String>)>,
}

impl Default for ArtifactFixture {
    fn default() -> Self {
        let mut coefficients = vec![0.0; 15];
        coefficients[1] = 10.0;
        coefficients[4] = 2.0;

        Self {
            files: vec![
                (REGRESSOR_FILE, Some(linear_regressor(&coefficients, 3.0).to_string())),
                (SCALER_FILE, Some(identity_scaler(15).to_string())),
                (LABEL_ENCODER_FILE, Some(json!({ "classes": ["F", "I", "M"] }).to_string())),
                (FEATURE_COLUMNS_FILE, Some(json!(FEATURE_COLUMNS).to_string())),
                (
                    METADATA_FILE,
                    Some(
                        json!({
                            "model_name": "fixture-linear",
                            "model_type": "LinearRegression",
                            "trained_at": "2024-05-01T12:00:00Z",
                            "metrics": { "rmse": 2.1, "r2": 0.55 },
                            "n_training_rows": 4177
                        })
                        .to_string(),
                    ),
                ),
            ],
        }
    }
}

impl ArtifactFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the document written for `file`.
    pub fn with(mut self, file: &'static str, doc: Value) -> Self {
        self.set(file, Some(doc.to_string()));
        self
    }

    /// Do not write `file` at all.
    pub fn without(mut self, file: &'static str) -> Self {
        self.set(file, None);
        self
    }

    /// Write bytes that are not valid JSON for `file`.
    pub fn corrupt(mut self, file: &'static str) -> Self {
        self.set(file, Some("\u{0080}not json{{".to_string()));
        self
    }

    fn set(&mut self, file: &'static str, content: Option<String>) {
        match self.files.iter_mut().find(|(name, _)| *name == file) {
            Some(entry) => entry.1 = content,
            None => self.files.push((file, content)),
        }
    }

    pub fn write_to(&self, dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)?;
        for (name, content) in &self.files {
            if let Some(content) = content {
                std::fs::write(dir.join(name), content)?;
            }
        }
        Ok(())
    }

    /// Write into a fresh temporary directory; the directory lives as long as the handle.
    pub fn write(&self) -> anyhow::Result<TempDir> {
        let dir = tempfile::tempdir()?;
        self.write_to(dir.path())?;
        Ok(dir)
    }
}

pub fn linear_regressor(coefficients: &[f64], intercept: f64) -> Value {
    json!({
        "kind": "linear",
        "coefficients": coefficients,
        "intercept": intercept
    })
}

pub fn identity_scaler(n_features: usize) -> Value {
    json!({
        "kind": "standard",
        "mean": vec![0.0; n_features],
        "scale": vec![1.0; n_features]
    })
}
