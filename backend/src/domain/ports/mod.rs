//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod enrollment_command;
mod enrollment_query;
mod enrollment_repository;

#[cfg(test)]
pub use enrollment_command::MockEnrollmentCommand;
pub use enrollment_command::{CreatedEnrollment, EnrollmentCommand};
#[cfg(test)]
pub use enrollment_query::MockEnrollmentQuery;
pub use enrollment_query::EnrollmentQuery;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{EnrollmentRepository, EnrollmentRepositoryError};
