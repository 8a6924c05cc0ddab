//! Rule-based ring estimate used when no trained model is available.
//!
//! Step function over shell volume proxy and whole weight, with an infant
//! discount floored at 3 rings. Breakpoints are fixed so that mock-mode
//! responses stay stable across deployments.

use abalone_common::{RawMeasurement, Sex};

/// Average ring count of the training population.
pub const BASE_RINGS: f64 = 8.0;

pub const LARGE_SIZE_THRESHOLD: f64 = 0.05;
pub const MEDIUM_SIZE_THRESHOLD: f64 = 0.02;
pub const HEAVY_WEIGHT_THRESHOLD: f64 = 0.5;
pub const MEDIUM_WEIGHT_THRESHOLD: f64 = 0.1;

pub const INFANT_DISCOUNT: f64 = 3.0;
pub const INFANT_FLOOR: f64 = 3.0;

/// Estimate ring count without a model.
pub fn mock_rings(raw: &RawMeasurement) -> f64 {
    let size_factor = raw.length * raw.diameter * raw.height;
    let weight_factor = raw.whole_weight;

    let mut rings = BASE_RINGS;

    if size_factor > LARGE_SIZE_THRESHOLD {
        rings += 3.0;
    } else if size_factor > MEDIUM_SIZE_THRESHOLD {
        rings += 1.0;
    }

    if weight_factor > HEAVY_WEIGHT_THRESHOLD {
        rings += 2.0;
    } else if weight_factor > MEDIUM_WEIGHT_THRESHOLD {
        rings += 1.0;
    }

    if raw.sex == Sex::Infant {
        rings = (rings - INFANT_DISCOUNT).max(INFANT_FLOOR);
    }

    rings
}
