//! Enrollment domain service.
//!
//! Implements the [`EnrollmentCommand`] and [`EnrollmentQuery`] driving ports
//! on top of an [`EnrollmentRepository`] gateway. The service holds no mutable
//! state, so one instance is shared across all request workers.
//!
//! Email uniqueness is checked twice: a fast-path `exists_by_email` lookup
//! before writing, then the gateway's own constraint on insert. Only the
//! second check is authoritative; concurrent requests can both pass the first.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use tracing::{error, info, instrument, warn};

use crate::domain::ports::{
    CreatedEnrollment, EnrollmentCommand, EnrollmentQuery, EnrollmentRepository,
    EnrollmentRepositoryError,
};
use crate::domain::{Enrollment, EnrollmentId, Error, NewEnrollment, ValidatedEnrollment};

/// Message returned alongside a newly created enrollment.
pub const ENROLLMENT_CONFIRMATION: &str = "Enrollment completed successfully!";

/// Sub-second digits kept on `created_at`, matching `TIMESTAMPTZ`.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Enrollment service implementing the driving ports.
#[derive(Clone)]
pub struct EnrollmentService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> EnrollmentService<R> {
    /// Create a service over the given gateway and clock.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> EnrollmentService<R>
where
    R: EnrollmentRepository,
{
    fn duplicate_email(email: &str) -> Error {
        Error::conflict(format!("an enrollment already exists for email: {email}"))
    }

    fn map_repository_error(error: EnrollmentRepositoryError) -> Error {
        match error {
            EnrollmentRepositoryError::DuplicateEmail { email } => Self::duplicate_email(&email),
            EnrollmentRepositoryError::Connection { message } => {
                error!(%message, "enrollment repository unavailable");
                Error::internal(format!("enrollment repository unavailable: {message}"))
            }
            EnrollmentRepositoryError::Query { message } => {
                error!(%message, "enrollment repository query failed");
                Error::internal(format!("enrollment repository error: {message}"))
            }
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(STORED_SUBSEC_DIGITS)
    }
}

#[async_trait]
impl<R> EnrollmentCommand for EnrollmentService<R>
where
    R: EnrollmentRepository,
{
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn create(&self, request: ValidatedEnrollment) -> Result<CreatedEnrollment, Error> {
        let email = request.email.clone();

        if self
            .repository
            .exists_by_email(email.as_ref())
            .await
            .map_err(Self::map_repository_error)?
        {
            warn!("enrollment rejected: email already registered");
            return Err(Self::duplicate_email(email.as_ref()));
        }

        let new_enrollment = NewEnrollment::from_validated(request, self.created_at());
        let enrollment = self
            .repository
            .insert(&new_enrollment)
            .await
            .map_err(|err| {
                if matches!(err, EnrollmentRepositoryError::DuplicateEmail { .. }) {
                    warn!("enrollment rejected by store uniqueness constraint");
                }
                Self::map_repository_error(err)
            })?;

        info!(id = %enrollment.id, "enrollment created");
        Ok(CreatedEnrollment {
            enrollment,
            message: ENROLLMENT_CONFIRMATION.to_owned(),
        })
    }
}

#[async_trait]
impl<R> EnrollmentQuery for EnrollmentService<R>
where
    R: EnrollmentRepository,
{
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Enrollment>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(Self::map_repository_error)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: EnrollmentId) -> Result<Option<Enrollment>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> Result<Option<Enrollment>, Error> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(Self::map_repository_error)
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> Result<bool, Error> {
        self.repository
            .exists_by_email(email)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
