//! Enrollment request and response payloads.
//!
//! Request fields are optional on the wire. A missing or `null` field becomes
//! an empty string, so the domain validator reports it ("name is required")
//! instead of the JSON decoder rejecting the whole body.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Enrollment, EnrollmentRequest};

/// Request payload for `POST /api/v1/enrollments`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateEnrollmentBody {
    /// Student name, 2 to 100 characters.
    #[schema(example = "Ana Silva")]
    pub name: Option<String>,
    /// Student email address, at most 100 characters.
    #[schema(example = "ana@ex.com")]
    pub email: Option<String>,
    /// Course name, 2 to 100 characters.
    #[schema(example = "Data Science")]
    pub course: Option<String>,
}

impl From<CreateEnrollmentBody> for EnrollmentRequest {
    fn from(body: CreateEnrollmentBody) -> Self {
        Self {
            name: body.name.unwrap_or_default(),
            email: body.email.unwrap_or_default(),
            course: body.course.unwrap_or_default(),
        }
    }
}

/// Enrollment as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    /// Identifier assigned by the store.
    #[schema(example = 1)]
    pub id: i64,
    /// Student name as submitted.
    #[schema(example = "Ana Silva")]
    pub name: String,
    /// Student email address as submitted.
    #[schema(example = "ana@ex.com")]
    pub email: String,
    /// Course name as submitted.
    #[schema(example = "Data Science")]
    pub course: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    #[schema(example = "2026-03-02T09:15:00.123Z")]
    pub created_at: String,
    /// Confirmation text, present only on creation.
    #[schema(example = "Enrollment completed successfully!")]
    pub message: Option<String>,
}

impl EnrollmentResponse {
    /// Build the client representation of `enrollment`, optionally carrying
    /// a confirmation message.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use enrollment::domain::{
    ///     CourseName, EmailAddress, Enrollment, EnrollmentId, StudentName,
    /// };
    /// use enrollment::inbound::http::enrollments_dto::EnrollmentResponse;
    ///
    /// let enrollment = Enrollment {
    ///     id: EnrollmentId::new(1),
    ///     name: StudentName::new("Ana Silva").expect("valid name"),
    ///     email: EmailAddress::new("ana@ex.com").expect("valid email"),
    ///     course: CourseName::new("Data Science").expect("valid course"),
    ///     created_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 15, 0).unwrap(),
    /// };
    /// let response = EnrollmentResponse::assemble(&enrollment, None);
    /// assert_eq!(response.created_at, "2026-03-02T09:15:00.000Z");
    /// assert!(response.message.is_none());
    /// ```
    #[must_use]
    pub fn assemble(enrollment: &Enrollment, message: Option<&str>) -> Self {
        Self {
            id: enrollment.id.get(),
            name: enrollment.name.to_string(),
            email: enrollment.email.to_string(),
            course: enrollment.course.to_string(),
            created_at: format_timestamp(enrollment.created_at),
            message: message.map(str::to_owned),
        }
    }
}

impl From<&Enrollment> for EnrollmentResponse {
    fn from(enrollment: &Enrollment) -> Self {
        Self::assemble(enrollment, None)
    }
}

/// Payload returned by `GET /api/v1/enrollments/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentHealthResponse {
    /// Always `UP` while the process serves requests.
    #[schema(example = "UP")]
    pub status: String,
    /// Human-readable status line.
    #[schema(example = "Enrollment API is running")]
    pub message: String,
    /// Time of the check, RFC 3339 UTC with millisecond precision.
    #[schema(example = "2026-03-02T09:15:00.123Z")]
    pub timestamp: String,
}

pub(crate) fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
