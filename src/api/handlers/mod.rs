//! API request handlers.

/// Registration, login, refresh and profile handlers.
pub mod auth;
