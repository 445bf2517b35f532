//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed enrollment entities and the business rules
//! applied to them. Adapters on either side (HTTP inbound, Diesel outbound)
//! depend on this module; it depends on neither.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId (alias to `trace_id::TraceId`): per-request correlation id.
//! - Enrollment, NewEnrollment, EnrollmentRequest and the validated field
//!   newtypes from `enrollment`.
//! - EnrollmentService: implements the enrollment driving ports.

pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::enrollment::{
    CourseName, EMAIL_MAX, EmailAddress, Enrollment, EnrollmentField, EnrollmentId,
    EnrollmentRequest, FieldViolation, FieldViolations, NAME_MAX, NAME_MIN, NewEnrollment,
    StudentName, ValidatedEnrollment,
};
pub use self::enrollment_service::{ENROLLMENT_CONFIRMATION, EnrollmentService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use enrollment::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("enrollment not found"))
/// }
/// # assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
