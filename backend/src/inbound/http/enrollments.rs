//! Enrollment HTTP handlers.
//!
//! ```text
//! POST /api/v1/enrollments {"name":"Ana Silva","email":"ana@ex.com","course":"Data Science"}
//! GET  /api/v1/enrollments
//! GET  /api/v1/enrollments/health
//! GET  /api/v1/enrollments/{id}
//! GET  /api/v1/enrollments/email/{email}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;

use crate::domain::{EnrollmentId, EnrollmentRequest, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::enrollments_dto::{
    CreateEnrollmentBody, EnrollmentHealthResponse, EnrollmentResponse, format_timestamp,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::violations_error;

/// Message reported by the enrollment health endpoint.
pub const ENROLLMENT_HEALTH_MESSAGE: &str = "Enrollment API is running";

fn not_found() -> Error {
    Error::not_found("enrollment not found")
}

/// Register the enrollment routes on a service config.
///
/// The literal `/enrollments/health` segment is registered ahead of
/// `/enrollments/{id}` so it is not parsed as an identifier.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use enrollment::inbound::http::enrollments;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(enrollments::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(enrollment_health)
        .service(create_enrollment)
        .service(list_enrollments)
        .service(get_enrollment_by_email)
        .service(get_enrollment);
}

/// Enroll a student in a course.
#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    request_body = CreateEnrollmentBody,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already enrolled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "createEnrollment"
)]
#[post("/enrollments")]
pub async fn create_enrollment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEnrollmentBody>,
) -> ApiResult<HttpResponse> {
    let request = EnrollmentRequest::from(payload.into_inner())
        .validate()
        .map_err(|violations| violations_error(&violations))?;
    let created = state.enrollments.create(request).await?;
    Ok(HttpResponse::Created().json(EnrollmentResponse::assemble(
        &created.enrollment,
        Some(created.message.as_str()),
    )))
}

/// List every enrollment.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments",
    responses(
        (status = 200, description = "Enrollments", body = [EnrollmentResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollments"
)]
#[get("/enrollments")]
pub async fn list_enrollments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EnrollmentResponse>>> {
    let enrollments = state.enrollments_query.list_all().await?;
    Ok(web::Json(
        enrollments.iter().map(EnrollmentResponse::from).collect(),
    ))
}

/// Fetch one enrollment by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment identifier")),
    responses(
        (status = 200, description = "Enrollment", body = EnrollmentResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "Enrollment not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "getEnrollment"
)]
#[get("/enrollments/{id}")]
pub async fn get_enrollment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<EnrollmentResponse>> {
    let id = EnrollmentId::new(path.into_inner());
    let enrollment = state
        .enrollments_query
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;
    Ok(web::Json(EnrollmentResponse::from(&enrollment)))
}

/// Fetch one enrollment by email address.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments/email/{email}",
    params(("email" = String, Path, description = "Registered email address")),
    responses(
        (status = 200, description = "Enrollment", body = EnrollmentResponse),
        (status = 404, description = "Enrollment not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "getEnrollmentByEmail"
)]
#[get("/enrollments/email/{email}")]
pub async fn get_enrollment_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EnrollmentResponse>> {
    let email = path.into_inner();
    let enrollment = state
        .enrollments_query
        .get_by_email(&email)
        .await?
        .ok_or_else(not_found)?;
    Ok(web::Json(EnrollmentResponse::from(&enrollment)))
}

/// Report that the enrollment API is serving requests.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments/health",
    responses(
        (status = 200, description = "Enrollment API is up", body = EnrollmentHealthResponse)
    ),
    tags = ["enrollments"],
    operation_id = "enrollmentHealth"
)]
#[get("/enrollments/health")]
pub async fn enrollment_health() -> web::Json<EnrollmentHealthResponse> {
    web::Json(EnrollmentHealthResponse {
        status: "UP".to_owned(),
        message: ENROLLMENT_HEALTH_MESSAGE.to_owned(),
        timestamp: format_timestamp(Utc::now()),
    })
}

#[cfg(test)]
#[path = "enrollments_tests.rs"]
mod tests;
