//! Shopper Common - inference contract for purchase-intent prediction.
//!
//! Turns raw session features into the exact vector the offline model was
//! fitted on (same encoders, same column order, same partial scaling) and
//! runs the fitted classifier on it.

pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod encoding;
pub mod error;
pub mod features;
pub mod predictor;
pub mod scaler;
pub mod schemas;
pub mod vector;

pub use artifacts::{ArtifactPaths, ModelArtifacts, ModelInfo};
pub use classifier::{Classifier, DECISION_THRESHOLD};
pub use config::ShopperConfig;
pub use domain::{DomainBounds, FieldDomain};
pub use encoding::EncodingTable;
pub use error::{Result, ShopperError};
pub use features::{Column, SessionFeatures, FEATURE_COUNT, SCALED_COUNT};
pub use predictor::{PredictionResult, PredictionTrace, Predictor};
pub use scaler::StandardScaler;
pub use schemas::{ErrorResponse, HealthResponse, ModelInfoResponse};
pub use vector::FeatureVector;
