//! # ident - bearer token identity service
//!
//! Issues, validates and rotates signed access/refresh token pairs for
//! password-authenticated users, and guards protected HTTP routes.
//!
//! ## Overview
//!
//! ident can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `ident-server` binary
//! 2. **As a library** - Embed the token core in your own axum service
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use ident::{api::routes::build_app, AppConfig, AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load("ident.toml")?;
//!     let state = AppState::from_config(config).await?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, build_app(state)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ### Minting and Validating Tokens Directly
//!
//! ```rust,ignore
//! use ident::auth::{claims::TokenClass, jwt::TokenCodec};
//!
//! let codec = TokenCodec::new(&config.signing_keys()?)?;
//! let token = codec.mint(TokenClass::Access, "user-1", "a@x.com")?;
//! let claims = codec.validate(TokenClass::Access, &token)?;
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-db` | Local SQLite database (default) |
//! | `turso` | Remote Turso database |
//! | `swagger-ui` | Interactive API docs at `/swagger-ui` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Token codec, password hashing, session issuer and access guard
//! - [`cli`] - Command-line interface
//! - [`db`] - User store (SQLite, Turso)
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and logging

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Token lifecycle and request authentication.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// User persistence (Turso/SQLite).
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and logging.
pub mod utils;

// Re-export commonly used types
pub use auth::jwt::TokenCodec;
pub use auth::middleware::AccessGuard;
pub use auth::service::SessionIssuer;
pub use db::{DatabaseProvider, TursoClient, UserStore};
pub use types::{AppError, Result};
pub use utils::config::AppConfig;

use crate::auth::password::Argon2Hasher;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Effective configuration, secrets not included
    pub config: Arc<AppConfig>,
    /// Register, login and refresh flows
    pub issuer: Arc<SessionIssuer>,
    /// Access token check for protected routes
    pub guard: Arc<AccessGuard>,
}

impl AppState {
    /// Wire the state from its collaborators. The guard and issuer share one codec.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn UserStore>,
        hasher: Argon2Hasher,
        codec: TokenCodec,
    ) -> Self {
        let codec = Arc::new(codec);
        Self {
            config: Arc::new(config),
            issuer: Arc::new(SessionIssuer::new(store, Arc::new(hasher), codec.clone())),
            guard: Arc::new(AccessGuard::new(codec)),
        }
    }

    /// Resolve secrets, open the configured database and build the state.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let keys = config.signing_keys()?;
        let codec = TokenCodec::new(&keys)?;

        let store = DatabaseProvider::from_config(&config).create_client().await?;

        Ok(Self::new(config, Arc::new(store), Argon2Hasher::default(), codec))
    }
}
