//! Request and response data transfer objects.

pub mod request;
pub mod response;

use validator::Validate;

use ampflux_core::error::AppError;
use ampflux_core::result::AppResult;

/// Run derive-based validation, mapping failures to a validation error.
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
