//! Subcommand implementations.

pub mod migrate;
pub mod shops;

use sqlx::PgPool;
use thiserror::Error;

use inkmap_api::config::{ApiConfig, ConfigError};
use inkmap_api::db::{StoreError, create_pool};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database endpoint or credential is missing.
    #[error("INKMAP_DATABASE_URL and INKMAP_SERVICE_KEY must both be set")]
    MissingDatabase,

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Some shops could not be updated.
    #[error("{0} shop(s) could not be given a slug")]
    Incomplete(usize),
}

/// Open a pool from the same environment the API server reads.
fn connect() -> Result<PgPool, CommandError> {
    let config = ApiConfig::from_env()?;
    let database = config.database.ok_or(CommandError::MissingDatabase)?;
    Ok(create_pool(&database)?)
}
