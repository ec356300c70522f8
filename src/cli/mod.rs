//! CLI module for ident-server
//!
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use crate::utils::config::{AppConfig, ConfigError};
use clap::{Parser, Subcommand};
use output::Output;
use std::path::{Path, PathBuf};

/// ident-server - bearer token identity service
#[derive(Parser, Debug)]
#[command(
    name = "ident-server",
    version,
    about = "Identity service issuing and rotating signed access/refresh tokens",
    after_help = "EXAMPLES:\n    \
                  ident-server                      # Start the server (reads ident.toml if present)\n    \
                  ident-server --config my.toml     # Use a custom config file\n    \
                  ident-server config --validate    # Check config and required env vars"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "ident.toml", global = true)]
    pub config: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Show the effective configuration
    Config {
        /// Also resolve secrets and database credentials from the environment
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn output(&self) -> Output {
        if self.no_color {
            Output::no_color()
        } else {
            Output::new()
        }
    }
}

/// Load the config file, falling back to defaults when it does not exist.
///
/// Runs before logging is initialised, so the fallback is reported on the terminal.
pub fn load_config(output: &Output, path: &Path) -> Result<AppConfig, ConfigError> {
    match AppConfig::load(path) {
        Err(ConfigError::FileNotFound(missing)) => {
            output.warning(&format!("{} not found, using defaults", missing.display()));
            Ok(AppConfig::default())
        }
        other => other,
    }
}

/// Print the effective configuration. Secrets are shown only as the env vars
/// they are read from.
pub fn show_config(output: &Output, config: &AppConfig, validate: bool) -> Result<(), ConfigError> {
    output.header("Server");
    output.kv("host", &config.server.host);
    output.kv("port", &config.server.port.to_string());
    output.kv("log_level", &config.server.log_level);
    output.kv("log_format", &config.server.log_format);

    output.header("Auth");
    output.kv("access_secret_env", &config.auth.access_secret_env);
    output.kv("refresh_secret_env", &config.auth.refresh_secret_env);
    output.kv("access_ttl", &format!("{}s", config.auth.access_ttl));
    output.kv("refresh_ttl", &format!("{}s", config.auth.refresh_ttl));

    output.header("Database");
    output.kv("url", &config.database.url);
    if let Some(env) = &config.database.turso_url_env {
        output.kv("turso_url_env", env);
    }
    if let Some(env) = &config.database.turso_token_env {
        output.kv("turso_token_env", env);
    }

    if validate {
        output.newline();
        match config.validate() {
            Ok(()) => output.success("Configuration is valid"),
            Err(e) => {
                output.error(&e.to_string());
                return Err(e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serving() {
        let cli = Cli::try_parse_from(["ident-server"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("ident.toml"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_validate_subcommand() {
        let cli =
            Cli::try_parse_from(["ident-server", "--config", "custom.toml", "config", "--validate"])
                .unwrap();
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.command, Some(Commands::Config { validate: true }));
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["ident-server", "serve", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.command, Some(Commands::Serve));
    }

    #[test]
    fn test_load_config_falls_back_when_file_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&Output::no_color(), &dir.path().join("ident.toml"))
            .expect("defaults");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.access_ttl, 900);
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ident.toml");
        std::fs::write(&path, "[server\nport = ").expect("write config");

        let result = load_config(&Output::no_color(), &path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_show_config_without_validation() {
        let config = AppConfig::default();
        assert!(show_config(&Output::no_color(), &config, false).is_ok());
    }

    #[test]
    fn test_show_config_reports_missing_secret() {
        let mut config = AppConfig::default();
        config.auth.access_secret_env = "IDENT_CLI_TEST_UNSET_ACCESS".to_string();
        config.auth.refresh_secret_env = "IDENT_CLI_TEST_UNSET_REFRESH".to_string();

        let result = show_config(&Output::no_color(), &config, true);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }
}
