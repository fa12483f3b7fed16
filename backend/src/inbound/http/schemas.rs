//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// No session cookie was presented.
    #[schema(rename = "unauthenticated")]
    Unauthenticated,
    /// The session cookie does not name a live session.
    #[schema(rename = "invalid_session")]
    InvalidSession,
    /// The resource belongs to someone else or its state forbids the action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A field failed validation; `details` names the field and rule.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// Storage could not serve the request; try again later.
    #[schema(rename = "storage_unavailable")]
    StorageUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "vin must be exactly 17 characters")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// `{ "field", "rule" }` for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Profile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Profile)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProfileSchema {
    #[schema(example = "driver01")]
    login: String,
    #[schema(example = "Ann")]
    name: String,
    #[schema(example = "Lee")]
    last_name: String,
    #[schema(example = "+1 555 0100")]
    phone: String,
    has_profile_image: bool,
}

/// OpenAPI schema for [`crate::domain::Author`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Author)]
pub enum AuthorSchema {
    #[schema(rename = "customer")]
    Customer,
    #[schema(rename = "staff")]
    Staff,
}

/// OpenAPI schema for [`crate::domain::Message`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Message)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MessageSchema {
    id: i64,
    order_id: i64,
    author: AuthorSchema,
    #[schema(example = "When will it be ready?")]
    text: String,
    #[schema(value_type = String, format = DateTime)]
    sent_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn schema_names_follow_domain_paths() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert_eq!(ProfileSchema::name(), "crate.domain.Profile");
        assert_eq!(MessageSchema::name(), "crate.domain.Message");
    }

    #[rstest]
    #[case("unauthenticated")]
    #[case("invalid_session")]
    #[case("forbidden")]
    #[case("not_found")]
    #[case("validation_failed")]
    #[case("storage_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_every_code(#[case] code: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(code), "missing {code}");
    }

    #[rstest]
    fn wire_field_names_are_camel_case() {
        assert!(schema_to_json::<ErrorSchema>().contains("traceId"));
        assert!(schema_to_json::<ProfileSchema>().contains("hasProfileImage"));
        assert!(schema_to_json::<MessageSchema>().contains("sentAt"));
    }
}
