//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the enrollment and health endpoints together with the
//! schema wrappers for domain types ([`ErrorSchema`], [`ErrorCodeSchema`]).
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use crate::inbound::http::enrollments_dto::{
    CreateEnrollmentBody, EnrollmentHealthResponse, EnrollmentResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ValidationDetailsSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Enrollment API",
        description = "Student course enrollment: create, list and look up enrollments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::enrollments::create_enrollment,
        crate::inbound::http::enrollments::list_enrollments,
        crate::inbound::http::enrollments::get_enrollment,
        crate::inbound::http::enrollments::get_enrollment_by_email,
        crate::inbound::http::enrollments::enrollment_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateEnrollmentBody,
        EnrollmentResponse,
        EnrollmentHealthResponse,
        ErrorSchema,
        ErrorCodeSchema,
        ValidationDetailsSchema,
    )),
    tags(
        (name = "enrollments", description = "Student course enrollments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn documents_every_enrollment_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/enrollments",
            "/api/v1/enrollments/{id}",
            "/api/v1/enrollments/email/{email}",
            "/api/v1/enrollments/health",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn response_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let response = schemas.get("EnrollmentResponse").expect("response schema");

        assert_object_schema_has_field(response, "createdAt");
        assert_object_schema_has_field(response, "message");
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    #[case::enrollment("EnrollmentResponse", &["id", "name", "email", "course", "createdAt", "message"])]
    #[case::health("EnrollmentHealthResponse", &["status", "message", "timestamp"])]
    fn response_fields_carry_descriptions(#[case] schema: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let value = serde_json::to_value(schemas.get(schema).expect("schema")).expect("serialise");

        for field in fields {
            let description = value["properties"][*field]["description"].as_str();
            assert!(
                description.is_some_and(|text| !text.is_empty()),
                "{schema}.{field} should be documented"
            );
        }
    }
}
