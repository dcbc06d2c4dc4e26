//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request and response schemas, and the bearer token security scheme. The
//! document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Category, Error, ErrorCode, Role, SuggestionStatus};
use crate::inbound::http::MessageResponse;
use crate::inbound::http::gear_dto::{
    GearCreatedResponse, GearPatchPayload, GearPayload, GearResponse, SuggestionCreatedResponse,
    SuggestionResponse,
};
use crate::inbound::http::users::{CreateUserRequest, LoginRequest, LoginResponse};

/// Name of the bearer security scheme in the document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gear catalog API",
        description = "Role-gated gear catalogue with anonymous suggestions and moderation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::create_user,
        crate::inbound::http::gear::list_gear,
        crate::inbound::http::gear::get_gear,
        crate::inbound::http::gear::create_gear,
        crate::inbound::http::gear::update_gear,
        crate::inbound::http::gear::delete_gear,
        crate::inbound::http::suggestions::submit_suggestion,
        crate::inbound::http::suggestions::list_suggestions,
        crate::inbound::http::suggestions::approve_suggestion,
        crate::inbound::http::suggestions::reject_suggestion,
        crate::inbound::http::suggestions::delete_suggestion,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        Category,
        SuggestionStatus,
        MessageResponse,
        LoginRequest,
        LoginResponse,
        CreateUserRequest,
        GearPayload,
        GearPatchPayload,
        GearResponse,
        GearCreatedResponse,
        SuggestionResponse,
        SuggestionCreatedResponse,
    )),
    tags(
        (name = "auth", description = "Login and account administration"),
        (name = "gear", description = "Catalogue reads and curation"),
        (name = "suggestions", description = "Community suggestions and moderation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
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
    #[case("/api/auth/login")]
    #[case("/api/auth/create-user")]
    #[case("/api/gears")]
    #[case("/api/gears/{id}")]
    #[case("/api/suggestions")]
    #[case("/api/suggestions/{id}/approve")]
    #[case("/api/suggestions/{id}/reject")]
    #[case("/api/suggestions/{id}")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn gear_schema_lists_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let gear = schemas.get("GearResponse").expect("GearResponse schema");
        for field in ["id", "name", "external_gear_id", "category"] {
            assert_object_schema_has_field(gear, field);
        }
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
