//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI document for the user-account service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        description = "User account service: registration, login, profile retrieval and update",
        version = "0.1.0"
    ),
    paths(
        crate::api::handlers::auth_handler::register,
        crate::api::handlers::auth_handler::login,
        crate::api::handlers::profile_handler::get_profile,
        crate::api::handlers::profile_handler::update_profile,
    ),
    components(schemas(
        crate::api::handlers::auth_handler::RegisterRequest,
        crate::api::handlers::auth_handler::LoginRequest,
        crate::api::handlers::auth_handler::LoginResponse,
        crate::api::handlers::profile_handler::UpdateProfileRequest,
        crate::api::handlers::profile_handler::MessageResponse,
        crate::domain::UserResponse,
        crate::domain::ProfileResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Profile", description = "Authenticated profile access")
    )
)]
pub struct ApiDoc;

/// Registers the bearer-token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
