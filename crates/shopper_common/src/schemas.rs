//! HTTP API schemas shared by shopperd and shopperctl.

use crate::artifacts::ModelInfo;
use crate::error::ShopperError;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Loaded model description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    #[serde(flatten)]
    pub info: ModelInfo,
    /// RFC 3339 time the artifacts were loaded
    pub loaded_at: String,
}

/// Body returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub kind: String,
    pub message: String,
}

impl From<&ShopperError> for ErrorResponse {
    fn from(err: &ShopperError) -> Self {
        Self {
            code: err.code(),
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_from_error() {
        let err = ShopperError::UnknownCategory {
            field: "Month",
            value: "Xyz".to_string(),
        };
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, err.code());
        assert_eq!(body.kind, "unknown_category");
        assert_eq!(body.message, "Unknown Month category: 'Xyz'");
    }
}
