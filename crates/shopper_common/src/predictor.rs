//! Session → purchase prediction.
//!
//! validate → encode → assemble → scale → classify. Every step is a pure
//! function of the request and the loaded artifacts.

use crate::artifacts::ModelArtifacts;
use crate::classifier::{sigmoid, DECISION_THRESHOLD};
use crate::config::ShopperConfig;
use crate::domain::DomainBounds;
use crate::encoding::encode_flag;
use crate::error::Result;
use crate::features::{Column, SessionFeatures};
use crate::vector::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the caller gets back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub will_purchase: bool,
    /// Positive-class probability, in `[0, 1]`.
    pub probability: f64,
}

impl PredictionResult {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            will_purchase: probability > DECISION_THRESHOLD,
            probability,
        }
    }

    /// One-line verdict for display.
    pub fn summary(&self) -> String {
        if self.will_purchase {
            format!(
                "This session is predicted to result in a purchase! Probability: {:.2}%",
                self.probability * 100.0
            )
        } else {
            format!(
                "This session is predicted NOT to result in a purchase. Probability: {:.2}%",
                self.probability * 100.0
            )
        }
    }
}

/// Every intermediate value of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionTrace {
    pub encoded: FeatureVector,
    pub scaled: FeatureVector,
    pub decision: f64,
    pub result: PredictionResult,
}

/// Loaded artifacts plus the input domains; shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: ModelArtifacts,
    bounds: DomainBounds,
}

impl Predictor {
    pub fn new(artifacts: ModelArtifacts, bounds: DomainBounds) -> Self {
        Self { artifacts, bounds }
    }

    /// Load artifacts and bounds as configured. Fails if either is unusable.
    pub fn from_config(config: &ShopperConfig) -> Result<Self> {
        let bounds = DomainBounds::with_overrides(&config.validation.bounds)?;
        let artifacts = ModelArtifacts::load(&config.artifacts.paths())?;
        Ok(Self::new(artifacts, bounds))
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn bounds(&self) -> &DomainBounds {
        &self.bounds
    }

    /// Validated, encoded vector in column order, before scaling.
    pub fn encode(&self, features: &SessionFeatures) -> Result<FeatureVector> {
        self.bounds.validate(features)?;

        let month = self
            .artifacts
            .month()
            .encode(Column::Month.name(), &features.month)?;
        let visitor_type = self
            .artifacts
            .visitor_type()
            .encode(Column::VisitorType.name(), &features.visitor_type)?;

        let mut vector = FeatureVector::zeroed();
        for column in Column::ALL {
            if let Some(value) = features.raw_numeric(column) {
                vector.set(column, value);
            }
        }
        vector.set(Column::Month, month);
        vector.set(Column::VisitorType, visitor_type);
        vector.set(Column::Weekend, encode_flag(features.weekend));
        Ok(vector)
    }

    pub fn predict(&self, features: &SessionFeatures) -> Result<PredictionResult> {
        Ok(self.explain(features)?.result)
    }

    pub fn explain(&self, features: &SessionFeatures) -> Result<PredictionTrace> {
        let encoded = self.encode(features)?;
        let mut scaled = encoded;
        self.artifacts.scaler().transform(&mut scaled);

        let decision = self.artifacts.classifier().decision_function(&scaled);
        let result = PredictionResult::from_probability(sigmoid(decision));
        debug!(
            "Predicted will_purchase={} p={:.4} (decision {:.4})",
            result.will_purchase, result.probability, decision
        );

        Ok(PredictionTrace {
            encoded,
            scaled,
            decision,
            result,
        })
    }
}
