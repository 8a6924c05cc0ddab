//! Request and response entities shared by the model and web crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AbaloneError, Result};

/// Years added to the ring count to obtain age.
pub const RINGS_TO_AGE_OFFSET: f64 = 1.5;

// ── Sex ──────────────────────────────────────────────────────────────────────

/// Sex of the abalone as recorded in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "I")]
    Infant,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Infant => "I",
        }
    }
}

impl FromStr for Sex {
    type Err = AbaloneError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            "I" => Ok(Sex::Infant),
            other => Err(AbaloneError::InvalidSex(other.to_string())),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Measurements ─────────────────────────────────────────────────────────────

/// Body of `POST /predict` as it arrives on the wire.
///
/// `sex` stays a plain string here so that an unknown value is reported as a
/// client error by the handler rather than as a schema error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementPayload {
    /// Sex of abalone: M (Male), F (Female), I (Infant)
    pub sex: String,
    /// Longest shell measurement (normalized)
    pub length: f64,
    /// Perpendicular to length (normalized)
    pub diameter: f64,
    /// With meat in shell (normalized)
    pub height: f64,
    /// Whole abalone weight
    pub whole_weight: f64,
    /// Weight of meat
    pub shucked_weight: f64,
    /// Gut weight after bleeding
    pub viscera_weight: f64,
    /// Weight after being dried
    pub shell_weight: f64,
}

impl MeasurementPayload {
    /// Check field ranges, then the sex code, and build a [`RawMeasurement`].
    pub fn into_measurement(self) -> Result<RawMeasurement> {
        check_unit("length", self.length)?;
        check_unit("diameter", self.diameter)?;
        check_unit("height", self.height)?;
        check_non_negative("whole_weight", self.whole_weight)?;
        check_non_negative("shucked_weight", self.shucked_weight)?;
        check_non_negative("viscera_weight", self.viscera_weight)?;
        check_non_negative("shell_weight", self.shell_weight)?;

        let sex = self.sex.parse::<Sex>()?;

        Ok(RawMeasurement {
            sex,
            length: self.length,
            diameter: self.diameter,
            height: self.height,
            whole_weight: self.whole_weight,
            shucked_weight: self.shucked_weight,
            viscera_weight: self.viscera_weight,
            shell_weight: self.shell_weight,
        })
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AbaloneError::OutOfRange { field, requirement: "must be between 0 and 1", value })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(AbaloneError::OutOfRange { field, requirement: "must be greater than or equal to 0", value })
    }
}

/// A validated set of physical measurements for one abalone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurement {
    pub sex: Sex,
    pub length: f64,
    pub diameter: f64,
    pub height: f64,
    pub whole_weight: f64,
    pub shucked_weight: f64,
    pub viscera_weight: f64,
    pub shell_weight: f64,
}

// ── Responses ────────────────────────────────────────────────────────────────

/// Which prediction path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Loaded,
    Mock,
}

impl ModelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Loaded => "loaded",
            ModelStatus::Mock => "mock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_rings: f64,
    pub predicted_age: f64,
    pub model_status: ModelStatus,
}

impl PredictionResult {
    /// Build a response from an unrounded ring count.
    ///
    /// Age is derived before rounding; both values are then rounded to two
    /// decimal places independently.
    pub fn from_rings(rings: f64, model_status: ModelStatus) -> Self {
        Self {
            predicted_rings: round2(rings),
            predicted_age: round2(rings + RINGS_TO_AGE_OFFSET),
            model_status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub message: String,
}

impl HealthResponse {
    pub fn new(model_loaded: bool) -> Self {
        let suffix = if model_loaded { " with model" } else { " in mock mode" };
        Self {
            status: "healthy".to_string(),
            model_loaded,
            message: format!("API is running{}", suffix),
        }
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
