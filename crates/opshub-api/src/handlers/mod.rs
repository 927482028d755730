//! HTTP request handlers.

pub mod auth;
pub mod group;
pub mod health;
pub mod server;
pub mod user;

use validator::Validate;

use opshub_core::error::AppError;

use crate::error::ApiError;

/// Run a DTO's validation rules, mapping the first failure to a
/// validation error.
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))
}
