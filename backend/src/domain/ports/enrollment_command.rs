//! Driving port for creating enrollments.
//!
//! Inbound adapters validate raw input into a [`ValidatedEnrollment`] and hand
//! it to this port; they never talk to the persistence gateway directly.

use async_trait::async_trait;

use crate::domain::{Enrollment, Error, ValidatedEnrollment};

/// Outcome of a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEnrollment {
    /// The stored record, carrying its generated identifier.
    pub enrollment: Enrollment,
    /// Confirmation message for the student.
    pub message: String,
}

/// Domain use-case port for enrolling a student.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Enroll a student, failing with [`crate::domain::ErrorCode::Conflict`]
    /// when the email is already registered.
    async fn create(&self, request: ValidatedEnrollment) -> Result<CreatedEnrollment, Error>;
}
