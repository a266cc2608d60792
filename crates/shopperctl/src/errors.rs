//! Exit codes for shopperctl

use crate::client::ClientError;
use shopper_common::ShopperError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the session features fail validation
pub const EXIT_INVALID_INPUT: i32 = 65;

/// Exit code when the model artifacts cannot be loaded
pub const EXIT_MODEL_UNAVAILABLE: i32 = 69;

/// Exit code when shopperd is unavailable/unreachable
pub const EXIT_DAEMON_UNAVAILABLE: i32 = 70;

/// Exit code when shopperd answered with something that is not its API
pub const EXIT_INVALID_RESPONSE: i32 = 76;

pub fn exit_code_for(err: &ShopperError) -> i32 {
    match err {
        ShopperError::UnknownCategory { .. }
        | ShopperError::OutOfDomain { .. }
        | ShopperError::InvalidRequest(_) => EXIT_INVALID_INPUT,
        ShopperError::ModelUnavailable(_) => EXIT_MODEL_UNAVAILABLE,
        ShopperError::Config(_) => EXIT_GENERAL_ERROR,
    }
}

pub fn exit_code_for_client(err: &ClientError) -> i32 {
    match err {
        ClientError::Unreachable { .. } => EXIT_DAEMON_UNAVAILABLE,
        ClientError::InvalidResponse { .. } => EXIT_INVALID_RESPONSE,
    }
}
