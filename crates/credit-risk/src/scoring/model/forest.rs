use serde::Deserialize;

use crate::scoring::pipeline::PredictionError;

/// Child index marking a leaf node.
pub const TREE_LEAF: i64 = -1;

/// Binary decision tree in parallel-array form. Node 0 is the root; a sample
/// goes left when `x[feature] <= threshold`. `value` holds the per-class
/// weights `[good, bad]` reaching each node.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Checks the arrays once so prediction can index without bounds errors.
    /// Children must point strictly forward, which also rules out cycles.
    pub(crate) fn validate(&self, n_features: usize) -> Result<(), String> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != nodes
            || self.feature.len() != nodes
            || self.threshold.len() != nodes
            || self.value.len() != nodes
        {
            return Err("tree node arrays differ in length".to_string());
        }

        for node in 0..nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(format!("node {node} has exactly one child"));
                }
                let [good, bad] = self.value[node];
                if !(good.is_finite() && bad.is_finite() && good >= 0.0 && bad >= 0.0)
                    || good + bad <= 0.0
                {
                    return Err(format!("leaf {node} has unusable class weights"));
                }
                continue;
            }

            for child in [left, right] {
                if child <= node as i64 || child >= nodes as i64 {
                    return Err(format!("node {node} points at invalid child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= n_features as i64 {
                return Err(format!("node {node} splits on unknown feature {feature}"));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {node} has a non-finite threshold"));
            }
        }

        Ok(())
    }

    /// Share of the default class at the leaf `features` lands in.
    pub fn leaf_probability(&self, features: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != TREE_LEAF {
            let split = self.feature[node] as usize;
            node = if features[split] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let [good, bad] = self.value[node];
        bad / (good + bad)
    }
}

/// Averaging ensemble of decision trees with its impurity-based importances.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub feature_importances: Vec<f64>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        if self.feature_importances.len() != self.n_features {
            return Err(format!(
                "{} importances for {} features",
                self.feature_importances.len(),
                self.n_features
            ));
        }
        if self
            .feature_importances
            .iter()
            .any(|importance| !importance.is_finite() || *importance < 0.0)
        {
            return Err("feature importances must be finite and non-negative".to_string());
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|reason| format!("tree {index}: {reason}"))?;
        }
        Ok(())
    }

    pub fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictionError> {
        if features.len() != self.n_features {
            return Err(PredictionError::SchemaMismatch(format!(
                "classifier expects {} features, received {}",
                self.n_features,
                features.len()
            )));
        }

        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.leaf_probability(features))
            .sum();
        let probability = total / self.trees.len() as f64;

        if probability.is_finite() {
            Ok(probability)
        } else {
            Err(PredictionError::NonFiniteProbability(probability))
        }
    }
}
