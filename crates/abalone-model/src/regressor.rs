//! Regressors exported from training.
//!
//! Two families are supported: linear models and tree ensembles stored as
//! flat node tables (random forests average their trees, gradient boosting
//! sums them with a learning rate).

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Single-sample regression over an already scaled feature row.
pub trait Regressor: Send + Sync {
    /// Number of input columns the model was fitted on.
    fn n_features(&self) -> usize;

    fn predict_one(&self, x: &[f64]) -> Result<f64>;
}

fn check_width(component: &'static str, expected: usize, x: &[f64]) -> Result<()> {
    if x.len() != expected {
        return Err(ModelError::FeatureMismatch { component, expected, got: x.len() });
    }
    Ok(())
}

// ── Linear ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(ModelError::invalid("regressor", "no coefficients"));
        }
        Ok(())
    }
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_one(&self, x: &[f64]) -> Result<f64> {
        check_width("LinearRegression", self.n_features(), x)?;
        let dot: f64 = self.coefficients.iter().zip(x).map(|(c, v)| c * v).sum();
        Ok(self.intercept + dot)
    }
}

// ── Tree ensemble ────────────────────────────────────────────────────────────

/// Marks a leaf in `children_left` / `children_right`.
pub const LEAF: i64 = -1;

/// Decision tree as parallel node arrays; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl Tree {
    fn node_count(&self) -> usize {
        self.value.len()
    }

    fn validate(&self, index: usize, n_features: usize) -> Result<()> {
        let n = self.node_count();
        let malformed = |message: String| ModelError::MalformedTree { tree: index, message };

        if n == 0 {
            return Err(malformed("no nodes".into()));
        }
        if [self.children_left.len(), self.children_right.len(), self.feature.len(), self.threshold.len()]
            .iter()
            .any(|&len| len != n)
        {
            return Err(malformed("node arrays differ in length".into()));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF && right == LEAF {
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(malformed(format!("node {} has invalid child {}", node, child)));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(malformed(format!("node {} splits on unknown feature {}", node, feature)));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf; `x[feature] <= threshold` goes left.
    fn predict(&self, index: usize, x: &[f64]) -> Result<f64> {
        let n = self.node_count();
        let mut node = 0usize;

        // A valid path visits each node at most once.
        for _ in 0..n {
            let left = self.children_left.get(node).copied().unwrap_or(LEAF);
            if left == LEAF {
                return self.value.get(node).copied().ok_or_else(|| ModelError::MalformedTree {
                    tree: index,
                    message: format!("leaf {} has no value", node),
                });
            }

            let feature = self.feature.get(node).copied().unwrap_or(-1);
            let value = usize::try_from(feature).ok().and_then(|f| x.get(f)).copied().ok_or_else(|| {
                ModelError::MalformedTree { tree: index, message: format!("node {} splits on unknown feature {}", node, feature) }
            })?;
            let threshold = self.threshold.get(node).copied().unwrap_or(f64::NAN);

            let next = if value <= threshold { left } else { self.children_right.get(node).copied().unwrap_or(LEAF) };
            node = usize::try_from(next).map_err(|_| ModelError::MalformedTree {
                tree: index,
                message: format!("node {} has invalid child {}", node, next),
            })?;
        }

        Err(ModelError::MalformedTree { tree: index, message: "no leaf reached".into() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest / extra trees)
    #[default]
    Mean,
    /// Learning-rate weighted sum (gradient boosting)
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(ModelError::invalid("regressor", "ensemble has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features)?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_one(&self, x: &[f64]) -> Result<f64> {
        check_width("TreeEnsemble", self.n_features, x)?;

        let mut total = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            total += tree.predict(i, x)?;
        }

        let raw = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.learning_rate * total,
        };
        Ok(self.base_score + raw)
    }
}

// ── Artifact ─────────────────────────────────────────────────────────────────

/// On-disk regressor document, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorArtifact {
    Linear(LinearRegressor),
    TreeEnsemble(TreeEnsemble),
}

impl RegressorArtifact {
    pub fn validate(&self) -> Result<()> {
        match self {
            RegressorArtifact::Linear(m) => m.validate(),
            RegressorArtifact::TreeEnsemble(m) => m.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RegressorArtifact::Linear(_) => "linear",
            RegressorArtifact::TreeEnsemble(_) => "tree_ensemble",
        }
    }
}

impl Regressor for RegressorArtifact {
    fn n_features(&self) -> usize {
        match self {
            RegressorArtifact::Linear(m) => m.n_features(),
            RegressorArtifact::TreeEnsemble(m) => m.n_features(),
        }
    }

    fn predict_one(&self, x: &[f64]) -> Result<f64> {
        match self {
            RegressorArtifact::Linear(m) => m.predict_one(x),
            RegressorArtifact::TreeEnsemble(m) => m.predict_one(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on feature 0 at 0.5: left leaf 2.0, right leaf 6.0.
    fn stump() -> Tree {
        Tree {
            children_left: vec![1, LEAF, LEAF],
            children_right: vec![2, LEAF, LEAF],
            feature: vec![0, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![4.0, 2.0, 6.0],
        }
    }

    fn constant(value: f64) -> Tree {
        Tree {
            children_left: vec![LEAF],
            children_right: vec![LEAF],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![value],
        }
    }

    #[test]
    fn test_linear_predict() {
        let m = LinearRegressor { coefficients: vec![1.0, -2.0, 0.5], intercept: 3.0 };
        assert_eq!(m.predict_one(&[1.0, 1.0, 4.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_linear_width_mismatch() {
        let m = LinearRegressor { coefficients: vec![1.0; 3], intercept: 0.0 };
        assert!(matches!(
            m.predict_one(&[1.0; 15]),
            Err(ModelError::FeatureMismatch { expected: 3, got: 15, .. })
        ));
    }

    #[test]
    fn test_forest_mean() {
        let forest = TreeEnsemble {
            n_features: 2,
            trees: vec![stump(), constant(10.0)],
            aggregation: Aggregation::Mean,
            base_score: 0.0,
            learning_rate: 1.0,
        };
        forest.validate().unwrap();
        assert_eq!(forest.predict_one(&[0.2, 0.0]).unwrap(), 6.0);
        assert_eq!(forest.predict_one(&[0.5, 0.0]).unwrap(), 6.0);
        assert_eq!(forest.predict_one(&[0.9, 0.0]).unwrap(), 8.0);
    }

    #[test]
    fn test_boosting_sum() {
        let gbm = TreeEnsemble {
            n_features: 1,
            trees: vec![stump(), stump()],
            aggregation: Aggregation::Sum,
            base_score: 9.0,
            learning_rate: 0.5,
        };
        assert_eq!(gbm.predict_one(&[1.0]).unwrap(), 15.0);
        assert_eq!(gbm.predict_one(&[0.0]).unwrap(), 11.0);
    }

    #[test]
    fn test_validate_rejects_bad_child() {
        let mut tree = stump();
        tree.children_right[0] = 7;
        let forest = TreeEnsemble {
            n_features: 1,
            trees: vec![tree],
            aggregation: Aggregation::Mean,
            base_score: 0.0,
            learning_rate: 1.0,
        };
        assert!(matches!(forest.validate(), Err(ModelError::MalformedTree { tree: 0, .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_feature() {
        let mut tree = stump();
        tree.feature[0] = 3;
        assert!(tree.validate(0, 2).is_err());
    }

    #[test]
    fn test_predict_survives_cycle() {
        // never validated: root points back to itself
        let tree = Tree {
            children_left: vec![0],
            children_right: vec![0],
            feature: vec![0],
            threshold: vec![1.0],
            value: vec![1.0],
        };
        assert!(tree.predict(0, &[0.0]).is_err());
    }

    #[test]
    fn test_artifact_deserialize() {
        let doc = r#"{
            "kind": "tree_ensemble",
            "n_features": 1,
            "aggregation": "sum",
            "base_score": 1.0,
            "trees": [{
                "children_left": [-1],
                "children_right": [-1],
                "feature": [-2],
                "threshold": [-2.0],
                "value": [2.5]
            }]
        }"#;
        let model: RegressorArtifact = serde_json::from_str(doc).unwrap();
        model.validate().unwrap();
        assert_eq!(model.kind(), "tree_ensemble");
        assert_eq!(model.n_features(), 1);
        assert_eq!(model.predict_one(&[0.3]).unwrap(), 3.5);

        let linear: RegressorArtifact =
            serde_json::from_str(r#"{"kind": "linear", "coefficients": [2.0], "intercept": 1.0}"#).unwrap();
        assert_eq!(linear.predict_one(&[3.0]).unwrap(), 7.0);
    }
}
