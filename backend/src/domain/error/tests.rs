//! Construction and serialisation rules for domain errors.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn conflict() -> Error {
    Error::conflict("an enrollment already exists for email: ana@ex.com")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::Conflict, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let error = Error::new(ErrorCode::InternalError, "");
    assert_eq!(error.message(), "unspecified error");
}

#[rstest]
fn try_with_trace_id_rejects_blank_values(conflict: Error) {
    let result = conflict.try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn trace_id_is_absent_outside_a_request(conflict: Error) {
    assert!(conflict.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_is_captured_inside_a_request() {
    let trace_id: TraceId = TRACE_ID.parse().expect("fixture UUID");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(conflict: Error) {
    let value = serde_json::to_value(conflict).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "an enrollment already exists for email: ana@ex.com",
        })
    );
}

#[rstest]
fn deserialises_trace_id_and_details() {
    let payload = json!({
        "code": "invalid_request",
        "message": "request validation failed",
        "traceId": TRACE_ID,
        "details": { "errors": { "name": "name is required" } },
    });
    let error: Error = serde_json::from_value(payload).expect("deserialise error");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.trace_id(), Some(TRACE_ID));
    assert_eq!(
        error.details(),
        Some(&json!({ "errors": { "name": "name is required" } }))
    );
}
