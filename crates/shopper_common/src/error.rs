//! Error types for the inference pipeline.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopperError {
    /// Categorical value absent from its fitted encoder.
    #[error("Unknown {field} category: '{value}'")]
    UnknownCategory { field: &'static str, value: String },

    /// Numeric field outside its declared bound. Values are rejected, never clamped.
    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfDomain {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Request body that is not a well-formed session.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ShopperError {
    pub fn code(&self) -> i32 {
        match self {
            ShopperError::UnknownCategory { .. } => -32010,
            ShopperError::OutOfDomain { .. } => -32011,
            ShopperError::ModelUnavailable(_) => -32012,
            ShopperError::Config(_) => -32013,
            ShopperError::InvalidRequest(_) => -32014,
        }
    }

    /// Stable machine-readable name, used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ShopperError::UnknownCategory { .. } => "unknown_category",
            ShopperError::OutOfDomain { .. } => "out_of_domain",
            ShopperError::ModelUnavailable(_) => "model_unavailable",
            ShopperError::Config(_) => "config",
            ShopperError::InvalidRequest(_) => "invalid_request",
        }
    }

    /// True for errors caused by the caller's input rather than the service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ShopperError::UnknownCategory { .. }
                | ShopperError::OutOfDomain { .. }
                | ShopperError::InvalidRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ShopperError>;
