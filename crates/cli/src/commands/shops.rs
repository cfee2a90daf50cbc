//! Shop maintenance commands.

use inkmap_api::db::PgDirectoryStore;
use inkmap_api::services::slugs::backfill_shop_slugs;
use inkmap_core::Slug;

use super::{CommandError, connect};

/// Assign slugs to shops created while slug writes were failing.
pub async fn backfill_slugs() -> Result<(), CommandError> {
    let store = PgDirectoryStore::new(connect()?);

    let report = backfill_shop_slugs(&store).await?;
    tracing::info!(
        assigned = report.assigned.len(),
        failed = report.failed.len(),
        "Slug backfill finished"
    );

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(CommandError::Incomplete(report.failed.len()))
    }
}

/// Print the base slug for `name`.
#[allow(clippy::print_stdout)]
pub fn preview_slug(name: &str) {
    match Slug::from_name(name) {
        Some(slug) => println!("{slug}"),
        None => println!("(empty; the shop would get shop-<id>)"),
    }
}
