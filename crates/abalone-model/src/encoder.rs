//! Categorical encoder for the `sex` column.

use abalone_common::Sex;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Maps each class label to its position in `classes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(ModelError::invalid("label encoder", "no classes"));
        }
        for (i, class) in self.classes.iter().enumerate() {
            if self.classes[..i].contains(class) {
                return Err(ModelError::invalid("label encoder", format!("duplicate class '{}'", class)));
            }
        }
        Ok(())
    }

    pub fn transform(&self, label: &str) -> Result<f64> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|i| i as f64)
            .ok_or_else(|| ModelError::UnknownLabel(label.to_string()))
    }

    pub fn encode(&self, sex: Sex) -> Result<f64> {
        self.transform(sex.as_str())
    }
}
