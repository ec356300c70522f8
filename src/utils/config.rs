//! TOML-based configuration for the identity service
//!
//! Infrastructure settings (server, auth, database) live in a TOML file
//! (`ident.toml` by default). Signing secrets are never written to the file;
//! the file names the environment variables that hold them, and they are
//! resolved exactly once at startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from ident.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `json` for machine-readable logs, anything else for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the access token secret
    #[serde(default = "default_access_secret_env")]
    pub access_secret_env: String,

    /// Environment variable name containing the refresh token secret
    #[serde(default = "default_refresh_secret_env")]
    pub refresh_secret_env: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_ttl: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl: i64,
}

fn default_access_secret_env() -> String {
    "JWT_ACCESS_SECRET".to_string()
}

fn default_refresh_secret_env() -> String {
    "JWT_REFRESH_SECRET".to_string()
}

fn default_access_ttl() -> i64 {
    900
}

fn default_refresh_ttl() -> i64 {
    604800
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret_env: default_access_secret_env(),
            refresh_secret_env: default_refresh_secret_env(),
            access_ttl: default_access_ttl(),
            refresh_ttl: default_refresh_ttl(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Local database path, or `:memory:`
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Environment variable for Turso URL (optional cloud config)
    #[serde(default)]
    pub turso_url_env: Option<String>,

    /// Environment variable for Turso auth token
    #[serde(default)]
    pub turso_token_env: Option<String>,
}

fn default_database_url() -> String {
    "./data/ident.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            turso_url_env: None,
            turso_token_env: None,
        }
    }
}

// ============= Signing Keys =============

/// Process-wide signing material, one secret and lifetime per token class.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct SigningKeys {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_ttl: i64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl: i64,
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl SigningKeys {
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_ttl: i64,
        refresh_ttl: i64,
    ) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Check the invariants every token operation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "signing secrets must not be empty".to_string(),
            ));
        }
        // A shared secret would let an access token pass as a refresh token.
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::ValidationError(
                "access and refresh secrets must differ".to_string(),
            ));
        }
        validate_ttls(self.access_ttl, self.refresh_ttl)
    }
}

/// Longest accepted token lifetime: ten years, in seconds.
pub const MAX_TTL: i64 = 10 * 365 * 24 * 60 * 60;

fn validate_ttls(access_ttl: i64, refresh_ttl: i64) -> Result<(), ConfigError> {
    if access_ttl <= 0 {
        return Err(ConfigError::ValidationError(format!(
            "access_ttl must be positive, got {}",
            access_ttl
        )));
    }
    if access_ttl >= refresh_ttl {
        return Err(ConfigError::ValidationError(format!(
            "access_ttl ({}) must be shorter than refresh_ttl ({})",
            access_ttl, refresh_ttl
        )));
    }
    if refresh_ttl > MAX_TTL {
        return Err(ConfigError::ValidationError(format!(
            "refresh_ttl must be at most {} seconds, got {}",
            MAX_TTL, refresh_ttl
        )));
    }
    Ok(())
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        validate_ttls(config.auth.access_ttl, config.auth.refresh_ttl)?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.signing_keys()?.validate()?;

        if let Some(ref env) = self.database.turso_url_env {
            self.validate_env_var(env)?;
        }
        if let Some(ref env) = self.database.turso_token_env {
            self.validate_env_var(env)?;
        }

        Ok(())
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok()
    }

    /// Resolve both secrets from the environment into validated signing keys
    pub fn signing_keys(&self) -> Result<SigningKeys, ConfigError> {
        let access_secret = self
            .resolve_env(&self.auth.access_secret_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.access_secret_env.clone()))?;
        let refresh_secret = self
            .resolve_env(&self.auth.refresh_secret_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.refresh_secret_env.clone()))?;

        let keys = SigningKeys::new(
            access_secret,
            refresh_secret,
            self.auth.access_ttl,
            self.auth.refresh_ttl,
        );
        keys.validate()?;
        Ok(keys)
    }

    /// Turso URL and token, when both env vars are configured and set
    pub fn turso_credentials(&self) -> Option<(String, String)> {
        let url = self.resolve_env(self.database.turso_url_env.as_deref()?)?;
        let token = self.resolve_env(self.database.turso_token_env.as_deref()?)?;
        if url.is_empty() || token.is_empty() {
            return None;
        }
        Some((url, token))
    }
}
