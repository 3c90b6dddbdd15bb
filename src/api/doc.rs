//! OpenAPI document skeleton. Paths and schemas are collected by
//! `utoipa-axum` when the routers are assembled.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Authentication";
pub const USER_TAG: &str = "Users";
pub const RESOURCE_TAG: &str = "Resources";
pub const RESERVATION_TAG: &str = "Reservations";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reservo",
        description = "A resource reservation API server",
    ),
    modifiers(&BearerScheme),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Registration, login and token endpoints"),
        (name = USER_TAG, description = "User profile and administration endpoints"),
        (name = RESOURCE_TAG, description = "Bookable resource endpoints"),
        (name = RESERVATION_TAG, description = "Reservation endpoints"),
        (name = HEALTH_TAG, description = "Service health probes"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearerAuth` scheme referenced by the protected
/// operations.
pub struct BearerScheme;

impl Modify for BearerScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let Some(components) = openapi.components.as_mut() else {
            return;
        };

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("JWT access token issued by the auth endpoints"))
            .build();
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(bearer));
    }
}
