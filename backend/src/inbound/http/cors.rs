//! Cross-origin policy for the enrollment API.
//!
//! The chat front-end calls the API from another origin, so every origin is
//! allowed unless a single one is configured.

use actix_cors::Cors;
use actix_web::http::{Method, header};

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware.
///
/// `None`, a blank value or `*` allow any origin and answer with a wildcard;
/// anything else restricts requests to that exact origin.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use enrollment::inbound::http::cors::cors_layer;
///
/// let _app = App::new().wrap(cors_layer(Some("https://bot.example.com")));
/// ```
#[must_use]
pub fn cors_layer(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::HeaderName::from_static(
            crate::domain::TRACE_ID_HEADER,
        )])
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    match allowed_origin.map(str::trim) {
        None | Some("" | "*") => cors.allow_any_origin().send_wildcard(),
        Some(origin) => cors.allowed_origin(origin),
    }
}
