//! Driven port for enrollment persistence.
//!
//! The gateway owns durable state and is the authority on email uniqueness:
//! [`EnrollmentRepository::insert`] must reject a second row for the same
//! email with [`EnrollmentRepositoryError::DuplicateEmail`] even when the
//! caller checked [`EnrollmentRepository::exists_by_email`] beforehand. A
//! read followed by a write is not atomic across two calls.

use async_trait::async_trait;

use crate::domain::{Enrollment, EnrollmentId, NewEnrollment};

use super::define_port_error;

define_port_error! {
    /// Failures raised by enrollment gateway adapters.
    pub enum EnrollmentRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "enrollment repository connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } =>
            "enrollment repository query failed: {message}",
        /// The uniqueness constraint on the email column rejected an insert.
        DuplicateEmail { email: String } =>
            "enrollment email already stored: {email}",
    }
}

/// Persistence gateway for enrollments. Every call is atomic on its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Store a new enrollment and return it with its generated identifier.
    async fn insert(&self, enrollment: &NewEnrollment)
    -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Every stored enrollment, in storage order.
    async fn find_all(&self) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// Enrollment with the given identifier, if stored.
    async fn find_by_id(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Enrollment registered under `email` (exact match), if stored.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Whether an enrollment is registered under `email` (exact match).
    async fn exists_by_email(&self, email: &str) -> Result<bool, EnrollmentRepositoryError>;
}
