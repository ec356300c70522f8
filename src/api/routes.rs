use crate::api::docs::ApiDoc;
use crate::api::handlers;
use crate::auth::middleware::{require_access, AccessGuard};
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Routes mounted under `/api`.
pub fn create_router(guard: Arc<AccessGuard>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh));

    let protected_routes = Router::new()
        // Protected routes (access token required)
        .route("/profile", get(handlers::auth::profile))
        .layer(middleware::from_fn_with_state(guard, require_access));

    public_routes.merge(protected_routes)
}

/// Full application: health check, API routes, OpenAPI document and request tracing.
pub fn build_app(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", create_router(state.guard.clone()));

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let app = app.route("/api-docs/openapi.json", get(openapi));

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[cfg_attr(feature = "swagger-ui", allow(dead_code))]
async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
