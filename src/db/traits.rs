//! User store abstraction
//!
//! The token core only ever reads users, except at registration. Everything
//! it needs from persistence is expressed by [`UserStore`], so the issuer can
//! run against libsql in production and a mock in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use ident::db::DatabaseProvider;
//!
//! // In-memory database (default for tests)
//! let store = DatabaseProvider::Memory.create_client().await?;
//!
//! // File-based SQLite
//! let store = DatabaseProvider::SQLite { path: "data/ident.db".into() }.create_client().await?;
//! ```

use crate::types::Result;
use crate::utils::config::AppConfig;
use async_trait::async_trait;

use super::turso::TursoClient;

/// User record from the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Persistence operations needed by the session issuer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Fails with `AlreadyExists` on a duplicate email or username.
    async fn create_user(
        &self,
        id: &str,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<User>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create a database client from this provider configuration
    pub async fn create_client(&self) -> Result<TursoClient> {
        match self {
            DatabaseProvider::Memory => TursoClient::new_memory().await,
            DatabaseProvider::SQLite { path } => TursoClient::new_local(path).await,
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                TursoClient::new_remote(url.clone(), auth_token.clone()).await
            }
        }
    }

    /// Pick the provider described by the configuration.
    ///
    /// Turso wins when its env vars are set (and the `turso` feature is on),
    /// then a file path, then in-memory.
    pub fn from_config(config: &AppConfig) -> Self {
        #[cfg(feature = "turso")]
        {
            if let Some((url, auth_token)) = config.turso_credentials() {
                return DatabaseProvider::Turso { url, auth_token };
            }
        }

        let path = config.database.url.trim();
        if !path.is_empty() && path != ":memory:" {
            return DatabaseProvider::SQLite {
                path: path.to_string(),
            };
        }

        DatabaseProvider::Memory
    }
}
