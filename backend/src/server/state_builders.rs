//! Builders for HTTP state backed by the configured enrollment gateway.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use enrollment::domain::EnrollmentService;
use enrollment::domain::ports::{EnrollmentCommand, EnrollmentQuery, EnrollmentRepository};
use enrollment::inbound::http::state::HttpState;
use enrollment::outbound::persistence::{
    DbPool, DieselEnrollmentRepository, InMemoryEnrollmentRepository,
};

use super::ServerConfig;

/// Wrap one service as both driving ports.
fn enrollment_ports<R>(repository: R) -> (Arc<dyn EnrollmentCommand>, Arc<dyn EnrollmentQuery>)
where
    R: EnrollmentRepository + 'static,
{
    let service = Arc::new(EnrollmentService::new(
        Arc::new(repository),
        Arc::new(DefaultClock),
    ));
    (
        service.clone() as Arc<dyn EnrollmentCommand>,
        service as Arc<dyn EnrollmentQuery>,
    )
}

/// Select the PostgreSQL gateway when a pool is configured, otherwise the
/// in-memory gateway.
fn build_enrollment_ports(
    pool: Option<&DbPool>,
) -> (Arc<dyn EnrollmentCommand>, Arc<dyn EnrollmentQuery>) {
    match pool {
        Some(pool) => enrollment_ports(DieselEnrollmentRepository::new(pool.clone())),
        None => {
            warn!("no database configured; enrollments are kept in memory only");
            enrollment_ports(InMemoryEnrollmentRepository::new())
        }
    }
}

/// Build the shared HTTP state for all workers.
///
/// Called once per server so every worker shares the same gateway; the
/// in-memory store would otherwise be split per worker.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (command, query) = build_enrollment_ports(config.db_pool.as_ref());
    web::Data::new(HttpState::new(command, query))
}
