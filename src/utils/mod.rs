//! Configuration and logging utilities.

/// TOML configuration and signing key resolution.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;
