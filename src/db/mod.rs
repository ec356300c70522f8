//! User persistence.
//!
//! - **Turso/SQLite** (libsql): in-memory, local file, or remote Turso.
//!
//! Enable the remote backend via Cargo features:
//! ```toml
//! ident-server = { version = "*", features = ["turso"] }
//! ```

#![allow(missing_docs)]

pub mod traits;
pub mod turso;

// Re-exports
pub use traits::{DatabaseProvider, User, UserStore};
pub use turso::TursoClient;
