//! Database migration command.
//!
//! Applies `crates/api/migrations/` to the configured database. The API
//! server never migrates on startup.

use super::{CommandError, connect};

/// Run pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect()?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
