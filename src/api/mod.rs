//! HTTP API Handlers and Routes
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::docs`](crate::api::docs) - OpenAPI document
//!
//! # API Endpoints
//!
//! ## Authentication (`/api`)
//! - `POST /api/register` - Register new user
//! - `POST /api/login` - Exchange credentials for an access/refresh pair
//! - `POST /api/refresh` - Exchange a refresh token for a new pair
//! - `GET /api/profile` - Identity of the caller (protected)
//!
//! ## Health
//! - `GET /health` - Liveness check
//!
//! # Authentication
//!
//! Protected endpoints require an access token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! The document is served at `/api-docs/openapi.json`. When the `swagger-ui`
//! feature is enabled, interactive documentation is available at `/swagger-ui/`.

/// OpenAPI document for all endpoints.
pub mod docs;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
