//! Enrollment persistence adapters.
//!
//! Two implementations of the domain `EnrollmentRepository` port live here:
//!
//! - [`DieselEnrollmentRepository`]: PostgreSQL via Diesel with async support
//!   through `diesel-async` and `bb8` connection pooling.
//! - [`InMemoryEnrollmentRepository`]: process-local storage for runs without
//!   a database and for tests.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) are
//! internal and never exposed to the domain layer.
//!
//! # Example
//!
//! ```no_run
//! use enrollment::outbound::persistence::{
//!     DbPool, DieselEnrollmentRepository, PoolConfig, apply_migrations,
//! };
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/enrollment";
//! apply_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _repository = DieselEnrollmentRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_enrollment_repository;
mod in_memory_enrollment_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use in_memory_enrollment_repository::InMemoryEnrollmentRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
