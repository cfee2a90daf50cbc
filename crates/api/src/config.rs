//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Database (both required for data endpoints)
//! - `INKMAP_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `INKMAP_SERVICE_KEY` - Privileged service credential used as the database password
//!
//! When either is missing the server still starts, but every data endpoint
//! answers `500 Server configuration error`.
//!
//! ## Optional
//! - `INKMAP_HOST` - Bind address (default: 127.0.0.1)
//! - `INKMAP_PORT` - Listen port (default: 3000)
//! - `INKMAP_LOG_FORMAT` - `json` for JSON logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Database endpoint and credential, if both are present
    pub database: Option<DatabaseConfig>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Database endpoint and service credential.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL
    pub database_url: SecretString,
    /// Service credential applied as the connection password
    pub service_key: SecretString,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("database_url", &"[REDACTED]")
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the bind address or port cannot be parsed.
    /// Missing database settings are not an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("INKMAP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("INKMAP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("INKMAP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("INKMAP_PORT".to_string(), e.to_string()))?;

        let database = DatabaseConfig::from_parts(
            get_database_url("INKMAP_DATABASE_URL"),
            get_optional_env("INKMAP_SERVICE_KEY"),
        );

        let log_format = parse_log_format(get_optional_env("INKMAP_LOG_FORMAT").as_deref());

        Ok(Self {
            host,
            port,
            database,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Combine the endpoint and credential; both must be present.
    #[must_use]
    pub fn from_parts(database_url: Option<String>, service_key: Option<String>) -> Option<Self> {
        Some(Self {
            database_url: SecretString::from(database_url?),
            service_key: SecretString::from(service_key?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Option<String> {
    get_optional_env(primary_key).or_else(|| get_optional_env("DATABASE_URL"))
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_log_format(value: Option<&str>) -> LogFormat {
    match value {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}
