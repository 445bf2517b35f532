//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Student enrollments. `email` carries a unique constraint.
    enrollments (id) {
        /// Primary key assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        course -> Varchar,
        /// Creation instant, microsecond precision.
        created_at -> Timestamptz,
    }
}
