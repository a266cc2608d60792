//! Pre-trained binary classifiers.
//!
//! Both model kinds produce a raw decision value; the positive-class
//! probability is the logistic sigmoid of it. A session is labelled a
//! purchase only when that probability is strictly above 0.5, so a tie goes
//! to the negative class.

use crate::error::{Result, ShopperError};
use crate::features::{Column, FEATURE_COUNT};
use crate::vector::FeatureVector;
use serde::{Deserialize, Serialize};

/// Probability above which a session counts as a purchase.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Marker for "no child" in the flat tree arrays.
const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    GradientBoosting(GradientBoosting),
    LogisticRegression(LogisticRegression),
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Classifier::GradientBoosting(_) => "gradient_boosting",
            Classifier::LogisticRegression(_) => "logistic_regression",
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        match self {
            Classifier::GradientBoosting(m) => m.feature_names.as_deref(),
            Classifier::LogisticRegression(m) => m.feature_names.as_deref(),
        }
    }

    pub(crate) fn check(&self) -> Result<()> {
        if let Some(names) = self.feature_names() {
            let expected: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(ShopperError::ModelUnavailable(format!(
                    "classifier was fitted on {:?}, expected {:?}",
                    names, expected
                )));
            }
        }
        match self {
            Classifier::GradientBoosting(m) => m.check(),
            Classifier::LogisticRegression(m) => m.check(),
        }
    }

    /// Raw decision value (log-odds of a purchase).
    pub fn decision_function(&self, x: &FeatureVector) -> f64 {
        match self {
            Classifier::GradientBoosting(m) => m.decision_function(x.as_slice()),
            Classifier::LogisticRegression(m) => m.decision_function(x.as_slice()),
        }
    }

    pub fn predict_proba(&self, x: &FeatureVector) -> f64 {
        sigmoid(self.decision_function(x))
    }
}

/// Binary gradient-boosted regression trees on the log-odds scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// Prior log-odds the boosting stages start from.
    pub init_raw: f64,
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

impl GradientBoosting {
    fn check(&self) -> Result<()> {
        if !self.init_raw.is_finite() || !self.learning_rate.is_finite() {
            return Err(ShopperError::ModelUnavailable(
                "gradient boosting prior or learning rate is not finite".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(ShopperError::ModelUnavailable(
                "gradient boosting model has no trees".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check()
                .map_err(|reason| ShopperError::ModelUnavailable(format!("tree {}: {}", i, reason)))?;
        }
        Ok(())
    }

    pub fn decision_function(&self, x: &[f64]) -> f64 {
        let mut raw = self.init_raw;
        for tree in &self.trees {
            raw += self.learning_rate * tree.predict(x);
        }
        raw
    }
}

/// One regression tree in flat array form. Node `i` is a leaf when
/// `children_left[i] == -1`; otherwise it sends `x` left when
/// `x[feature[i]] <= threshold[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    fn check(&self) -> std::result::Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("node arrays have different lengths".to_string());
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF {
                if right != LEAF {
                    return Err(format!("node {} has a right child but no left child", i));
                }
                if !self.value[i].is_finite() {
                    return Err(format!("leaf {} has a non-finite value", i));
                }
                continue;
            }
            // Children always come after their parent, so traversal terminates.
            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {} points at invalid child {}", i, child));
                }
            }
            if !(0..FEATURE_COUNT as i64).contains(&self.feature[i]) {
                return Err(format!(
                    "node {} splits on feature {}, model has {}",
                    i, self.feature[i], FEATURE_COUNT
                ));
            }
            if !self.threshold[i].is_finite() {
                return Err(format!("node {} has a non-finite threshold", i));
            }
        }
        Ok(())
    }

    /// Leaf value reached by `x`.
    ///
    /// The trees were grown on single-precision inputs, so the feature is
    /// rounded to `f32` before the comparison.
    pub fn predict(&self, x: &[f64]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = x[self.feature[node] as usize] as f32;
            node = if f64::from(feature) <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

/// Plain logistic regression over all seventeen columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    fn check(&self) -> Result<()> {
        if self.coef.len() != FEATURE_COUNT {
            return Err(ShopperError::ModelUnavailable(format!(
                "logistic regression has {} coefficients, expected {}",
                self.coef.len(),
                FEATURE_COUNT
            )));
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|c| !c.is_finite()) {
            return Err(ShopperError::ModelUnavailable(
                "logistic regression has non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn decision_function(&self, x: &[f64]) -> f64 {
        self.intercept + self.coef.iter().zip(x).map(|(c, v)| c * v).sum::<f64>()
    }
}

/// Logistic sigmoid that does not overflow for large `|z|`.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
