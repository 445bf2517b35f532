//! HTTP inbound adapter exposing REST endpoints.

pub mod cors;
pub mod enrollments;
pub mod enrollments_dto;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// Versioned API scope with extractor error handlers installed.
///
/// Handlers expect [`state::HttpState`] registered as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use enrollment::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(validation::json_config())
        .app_data(validation::path_config())
        .configure(enrollments::configure)
}
