//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` endpoint, the health probes, the
//! request and response DTOs, and schema wrappers for the domain types that
//! are served directly ([`ProfileSchema`], [`MessageSchema`]). The session
//! cookie is declared as the API's security scheme.
//!
//! Swagger UI serves the document in debug builds.

use crate::inbound::http::accounts::{CreatedResponse, LoginRequest, RegistrationRequest};
use crate::inbound::http::cars::{CarRequest, CarResponse};
use crate::inbound::http::messages::MessageRequest;
use crate::inbound::http::orders::{OrderCreateRequest, OrderResponse};
use crate::inbound::http::schemas::{
    AuthorSchema, ErrorCodeSchema, ErrorSchema, MessageSchema, ProfileSchema,
};
use crate::inbound::http::session::SESSION_COOKIE;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE,
                "Session token issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Service station API",
        description = "Customer accounts, cars, service orders, and order message threads.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::profile,
        crate::inbound::http::accounts::get_profile_image,
        crate::inbound::http::accounts::put_profile_image,
        crate::inbound::http::accounts::delete_profile_image,
        crate::inbound::http::cars::add_car,
        crate::inbound::http::cars::list_cars,
        crate::inbound::http::cars::remove_car,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::messages::list_messages,
        crate::inbound::http::messages::post_message,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ProfileSchema,
        AuthorSchema,
        MessageSchema,
        RegistrationRequest,
        CreatedResponse,
        LoginRequest,
        CarRequest,
        CarResponse,
        OrderCreateRequest,
        OrderResponse,
        MessageRequest,
    )),
    tags(
        (name = "accounts", description = "Registration, sessions, and profiles"),
        (name = "cars", description = "Cars registered by the customer"),
        (name = "orders", description = "Service orders and their message threads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

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

    #[rstest]
    #[case("crate.domain.Error", "code")]
    #[case("crate.domain.Error", "traceId")]
    #[case("crate.domain.Profile", "hasProfileImage")]
    #[case("crate.domain.Message", "orderId")]
    #[case("OrderResponse", "hasUnreadMessage")]
    #[case("CarResponse", "vin")]
    fn registered_schemas_expose_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/registration")]
    #[case("/api/v1/login")]
    #[case("/api/v1/logout")]
    #[case("/api/v1/profile")]
    #[case("/api/v1/profile/image")]
    #[case("/api/v1/cars")]
    #[case("/api/v1/cars/{id}")]
    #[case("/api/v1/orders")]
    #[case("/api/v1/orders/{id}")]
    #[case("/api/v1/orders/{id}/messages")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_names_the_token_cookie() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("serialise document");
        let scheme = &json["components"]["securitySchemes"]["SessionCookie"];
        assert_eq!(scheme["in"], "cookie");
        assert_eq!(scheme["name"], SESSION_COOKIE);
    }
}
