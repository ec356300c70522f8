use crate::{
    auth::claims::Identity,
    types::{ApiResponse, LoginRequest, ProfileResponse, RefreshRequest, RegisterRequest, TokenPair},
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::auth::register,
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::refresh,
        crate::api::handlers::auth::profile,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        RefreshRequest,
        TokenPair,
        ApiResponse<TokenPair>,
        ProfileResponse,
        Identity,
    )),
    modifiers(&BearerAuth),
    tags((name = "auth", description = "Token issuance and rotation"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
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
