//! Fitted feature scalers.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Per-column linear transform fitted during training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// `(x - mean) / scale`; a zero scale leaves the centred value unscaled.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl FeatureScaler {
    fn name(&self) -> &'static str {
        match self {
            FeatureScaler::Standard { .. } => "StandardScaler",
            FeatureScaler::MinMax { .. } => "MinMaxScaler",
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            FeatureScaler::Standard { scale, .. } | FeatureScaler::MinMax { scale, .. } => scale.len(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (offset, scale) = match self {
            FeatureScaler::Standard { mean, scale } => (mean, scale),
            FeatureScaler::MinMax { min, scale } => (min, scale),
        };
        if scale.is_empty() {
            return Err(ModelError::invalid("scaler", "no columns"));
        }
        if offset.len() != scale.len() {
            return Err(ModelError::invalid(
                "scaler",
                format!("{} offsets but {} scales", offset.len(), scale.len()),
            ));
        }
        if offset.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::invalid("scaler", "non-finite parameter"));
        }
        Ok(())
    }

    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.n_features() {
            return Err(ModelError::FeatureMismatch {
                component: self.name(),
                expected: self.n_features(),
                got: x.len(),
            });
        }

        let out = match self {
            FeatureScaler::Standard { mean, scale } => x
                .iter()
                .zip(mean.iter().zip(scale.iter()))
                .map(|(v, (m, s))| {
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (v - m) / s
                })
                .collect(),
            FeatureScaler::MinMax { min, scale } => x
                .iter()
                .zip(min.iter().zip(scale.iter()))
                .map(|(v, (m, s))| v * s + m)
                .collect(),
        };
        Ok(out)
    }
}
