//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EnrollmentCommand, EnrollmentQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub enrollments: Arc<dyn EnrollmentCommand>,
    pub enrollments_query: Arc<dyn EnrollmentQuery>,
}

impl HttpState {
    /// Construct state from the enrollment driving ports.
    ///
    /// A single service usually implements both ports, in which case the same
    /// `Arc` is passed twice.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use enrollment::domain::EnrollmentService;
    /// use enrollment::inbound::http::state::HttpState;
    /// use enrollment::outbound::persistence::InMemoryEnrollmentRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(EnrollmentService::new(
    ///     Arc::new(InMemoryEnrollmentRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.enrollments_query.clone();
    /// ```
    pub fn new(
        enrollments: Arc<dyn EnrollmentCommand>,
        enrollments_query: Arc<dyn EnrollmentQuery>,
    ) -> Self {
        Self {
            enrollments,
            enrollments_query,
        }
    }
}
