//! Sample `/predict` bodies taken from the reference dataset.

use serde_json::{json, Value};

/// Adult male; 11.0 rings under the heuristic.
pub fn adult_male() -> Value {
    json!({
        "sex": "M",
        "length": 0.595,
        "diameter": 0.475,
        "height": 0.15,
        "whole_weight": 0.9145,
        "shucked_weight": 0.3755,
        "viscera_weight": 0.2055,
        "shell_weight": 0.25
    })
}

/// Adult female; 11.0 rings under the heuristic.
pub fn adult_female() -> Value {
    json!({
        "sex": "F",
        "length": 0.530,
        "diameter": 0.420,
        "height": 0.135,
        "whole_weight": 0.677,
        "shucked_weight": 0.256,
        "viscera_weight": 0.142,
        "shell_weight": 0.210
    })
}

/// Infant; 5.0 rings under the heuristic.
pub fn infant() -> Value {
    json!({
        "sex": "I",
        "length": 0.200,
        "diameter": 0.150,
        "height": 0.030,
        "whole_weight": 0.055,
        "shucked_weight": 0.020,
        "viscera_weight": 0.010,
        "shell_weight": 0.015
    })
}

/// Copy of `base` with one field replaced.
pub fn with_field(base: Value, field: &str, value: Value) -> Value {
    let mut body = base;
    if let Some(obj) = body.as_object_mut() {
        obj.insert(field.to_string(), value);
    }
    body
}
