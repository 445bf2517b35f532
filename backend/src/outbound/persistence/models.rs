//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::enrollments;

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub course: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new enrollment records; `id` comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub course: &'a str,
    pub created_at: DateTime<Utc>,
}
