//! Token lifecycle and request authentication
//!
//! # Module Structure
//!
//! - [`auth::claims`](crate::auth::claims) - Token classes, claim set, caller identity
//! - [`auth::jwt`](crate::auth::jwt) - Minting and validating signed tokens
//! - [`auth::password`](crate::auth::password) - Argon2id hashing and credential checks
//! - [`auth::service`](crate::auth::service) - Register, login and refresh flows
//! - [`auth::middleware`](crate::auth::middleware) - Axum layer and extractor for protected routes
//! - [`auth::validation`](crate::auth::validation) - Request payload rules
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id with a random salt per hash, stored as a PHC string
//! - **JWT Tokens**: HS256, one secret per token class, zero clock leeway
//! - **Class Isolation**: an access token never validates as a refresh token, and vice versa
//!
//! # Usage
//!
//! ## Issuing Tokens
//!
//! ```ignore
//! use ident::auth::{claims::TokenClass, jwt::TokenCodec};
//!
//! let codec = TokenCodec::new(&config.signing_keys()?)?;
//! let pair = codec.issue_pair(&user.id, &user.email)?;
//! let claims = codec.validate(TokenClass::Refresh, &pair.refresh_token)?;
//! ```
//!
//! ## Extracting the Caller in Handlers
//!
//! ```ignore
//! async fn protected_handler(AuthUser(identity): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", identity.email)
//! }
//! ```
//!
//! # Configuration
//!
//! Configure via `ident.toml`; the secrets themselves are read from env vars:
//! ```toml
//! [auth]
//! access_secret_env = "JWT_ACCESS_SECRET"
//! refresh_secret_env = "JWT_REFRESH_SECRET"
//! access_ttl = 900
//! refresh_ttl = 604800
//! ```

/// Token classes, claims and the authenticated identity.
pub mod claims;
/// JWT minting and validation.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Password hashing and verification.
pub mod password;
/// Registration, login and refresh.
pub mod service;
/// Request payload validation.
pub mod validation;
