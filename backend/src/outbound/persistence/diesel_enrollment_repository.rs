//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `enrollments_email_key` constraint. An
//! insert rejected by it surfaces as
//! [`EnrollmentRepositoryError::DuplicateEmail`], regardless of whether the
//! caller checked `exists_by_email` first.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{
    CourseName, EmailAddress, Enrollment, EnrollmentId, NewEnrollment, StudentName,
};

use super::models::{EnrollmentRow, NewEnrollmentRow};
use super::pool::DbPool;
use super::schema::enrollments;

/// Unique constraint on `enrollments.email`, named by the initial migration.
const EMAIL_UNIQUE_CONSTRAINT: &str = "enrollments_email_key";

/// Diesel-backed implementation of the `EnrollmentRepository` port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map Diesel errors to gateway errors.
fn map_diesel_error(error: DieselError) -> EnrollmentRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EnrollmentRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => {
            EnrollmentRepositoryError::query("database query error")
        }
        DieselError::DeserializationError(_) => {
            EnrollmentRepositoryError::query("unreadable enrollment row")
        }
        _ => EnrollmentRepositoryError::query("database error"),
    }
}

/// Map insert failures, turning a violation of the email constraint into
/// `DuplicateEmail`. Other unique violations stay query errors.
fn map_insert_error(error: DieselError, email: &str) -> EnrollmentRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if info.constraint_name() == Some(EMAIL_UNIQUE_CONSTRAINT) =>
        {
            EnrollmentRepositoryError::duplicate_email(email)
        }
        other => map_diesel_error(other),
    }
}

/// Convert a database row to a domain enrollment.
///
/// Rows are written only through validated domain types, so a failure here
/// means the table was modified out of band.
fn row_to_enrollment(row: EnrollmentRow) -> Result<Enrollment, EnrollmentRepositoryError> {
    let EnrollmentRow {
        id,
        name,
        email,
        course,
        created_at,
    } = row;
    let corrupted = |err: crate::domain::FieldViolation| {
        EnrollmentRepositoryError::query(format!("corrupted enrollment {id} in database: {err}"))
    };

    Ok(Enrollment {
        id: EnrollmentId::new(id),
        name: StudentName::new(name).map_err(corrupted)?,
        email: EmailAddress::new(email).map_err(corrupted)?,
        course: CourseName::new(course).map_err(corrupted)?,
        created_at,
    })
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn insert(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await?;

        let row = NewEnrollmentRow {
            name: enrollment.name.as_ref(),
            email: enrollment.email.as_ref(),
            course: enrollment.course.as_ref(),
            created_at: enrollment.created_at,
        };

        let stored: EnrollmentRow = diesel::insert_into(enrollments::table)
            .values(&row)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, enrollment.email.as_ref()))?;

        row_to_enrollment(stored)
    }

    async fn find_all(&self) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<EnrollmentRow> = enrollments::table
            .order(enrollments::id.asc())
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_enrollment).collect()
    }

    async fn find_by_id(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await?;

        let row: Option<EnrollmentRow> = enrollments::table
            .find(id.get())
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_enrollment).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await?;

        let row: Option<EnrollmentRow> = enrollments::table
            .filter(enrollments::email.eq(email))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_enrollment).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(
            enrollments::table.filter(enrollments::email.eq(email)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
