//! Driving port for enrollment lookups.
//!
//! Absent records are `Ok(None)`; mapping them to a not-found response is the
//! inbound adapter's decision.

use async_trait::async_trait;

use crate::domain::{Enrollment, EnrollmentId, Error};

/// Domain use-case port for reading enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// Every enrollment in storage order.
    async fn list_all(&self) -> Result<Vec<Enrollment>, Error>;

    /// Enrollment with the given identifier, if any.
    async fn get_by_id(&self, id: EnrollmentId) -> Result<Option<Enrollment>, Error>;

    /// Enrollment registered under `email`, if any.
    async fn get_by_email(&self, email: &str) -> Result<Option<Enrollment>, Error>;

    /// Whether an enrollment is registered under `email`.
    async fn exists_by_email(&self, email: &str) -> Result<bool, Error>;
}
