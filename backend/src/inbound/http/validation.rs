//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field violations found by the domain validator and extractor failures
//! raised by Actix (malformed JSON, unparsable path segments) all leave the
//! process as `invalid_request` errors.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, FieldViolations};

/// Message used when a request fails field validation.
pub(crate) const VALIDATION_FAILED_MESSAGE: &str = "request validation failed";

/// Convert field violations into an error carrying `details.errors`, a map
/// from field name to message.
pub(crate) fn violations_error(violations: &FieldViolations) -> Error {
    Error::invalid_request(VALIDATION_FAILED_MESSAGE)
        .with_details(json!({ "errors": violations.to_messages() }))
}

fn json_error(err: &JsonPayloadError) -> Error {
    let message = match err {
        JsonPayloadError::ContentType => "request body must be application/json",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "request body is too large"
        }
        _ => "request body must be valid JSON",
    };
    Error::invalid_request(message).with_details(json!({ "reason": err.to_string() }))
}

/// Error handler for [`web::JsonConfig`] mapping body failures to
/// `invalid_request`.
pub(crate) fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "rejected request body");
    json_error(&err).into()
}

/// Error handler for [`web::PathConfig`] mapping unparsable segments to
/// `invalid_request`.
pub(crate) fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "rejected path parameters");
    Error::invalid_request("path parameter is not valid")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// JSON extractor configuration shared by every JSON endpoint.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Path extractor configuration shared by every endpoint with path segments.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
