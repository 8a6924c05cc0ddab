//! Feature engineering.
//!
//! Derives seven geometric and ratio features from the raw measurements and
//! assembles the 15-column input the scaler and regressor were fitted on.
//! The formulas and the column order must match the training export exactly.

use std::f64::consts::PI;

use abalone_common::RawMeasurement;
use serde::{Deserialize, Serialize};

/// Added to every denominator.
pub const EPSILON: f64 = 1e-8;

pub const N_FEATURES: usize = 15;

/// Column order of the model input.
pub const FEATURE_COLUMNS: [&str; N_FEATURES] = [
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

pub type FeatureVector = [f64; N_FEATURES];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineeredFeatures {
    #[serde(rename = "Volume")]
    pub volume: f64,
    #[serde(rename = "Density")]
    pub density: f64,
    #[serde(rename = "Shell_ratio")]
    pub shell_ratio: f64,
    #[serde(rename = "Meat_ratio")]
    pub meat_ratio: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "Surface_area")]
    pub surface_area: f64,
    #[serde(rename = "Shucked_Viscera_ratio")]
    pub shucked_viscera_ratio: f64,
}

impl EngineeredFeatures {
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.volume,
            self.density,
            self.shell_ratio,
            self.meat_ratio,
            self.bmi,
            self.surface_area,
            self.shucked_viscera_ratio,
        ]
    }
}

/// Compute the engineered features for one measurement.
pub fn engineer(raw: &RawMeasurement) -> EngineeredFeatures {
    let (l, d, h) = (raw.length, raw.diameter, raw.height);
    let volume = (4.0 / 3.0) * PI * l * d * h;

    EngineeredFeatures {
        volume,
        density: raw.whole_weight / (volume + EPSILON),
        shell_ratio: raw.shell_weight / (raw.whole_weight + EPSILON),
        meat_ratio: raw.shucked_weight / (raw.whole_weight + EPSILON),
        bmi: raw.whole_weight / (l.powi(2) + EPSILON),
        surface_area: 2.0 * PI * ((l * d + l * h + d * h) / 3.0),
        shucked_viscera_ratio: raw.shucked_weight / (raw.viscera_weight + EPSILON),
    }
}

/// Assemble the model input: encoded sex, the seven raw measurements, then
/// the engineered features.
pub fn feature_vector(encoded_sex: f64, raw: &RawMeasurement) -> FeatureVector {
    let eng = engineer(raw);
    [
        encoded_sex,
        raw.length,
        raw.diameter,
        raw.height,
        raw.whole_weight,
        raw.shucked_weight,
        raw.viscera_weight,
        raw.shell_weight,
        eng.volume,
        eng.density,
        eng.shell_ratio,
        eng.meat_ratio,
        eng.bmi,
        eng.surface_area,
        eng.shucked_viscera_ratio,
    ]
}
