//! Shop slug assignment.
//!
//! A shop's slug is its name slugified. If another shop already holds that
//! slug the new shop gets `<base>-<id>`; a name with no usable characters
//! gets `shop-<id>`. Because both fallbacks need the shop id, the slug is
//! chosen in two steps: [`SlugPlan::for_name`] before the insert,
//! [`SlugPlan::resolve`] after it.

use inkmap_core::{ShopId, Slug};

use crate::db::{DirectoryStore, StoreError};

/// Slug decision taken before the shop id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugPlan {
    base: Option<Slug>,
    taken: bool,
}

impl SlugPlan {
    /// Slugify `name` and check whether the result is already taken.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the existence check fails.
    pub async fn for_name(store: &dyn DirectoryStore, name: &str) -> Result<Self, StoreError> {
        let base = Slug::from_name(name);
        let taken = match &base {
            Some(slug) => store.shop_slug_exists(slug).await?,
            None => false,
        };
        Ok(Self { base, taken })
    }

    /// The final slug for the shop `id`.
    #[must_use]
    pub fn resolve(self, id: ShopId) -> Slug {
        match self.base {
            Some(base) if self.taken => base.with_suffix(id),
            Some(base) => base,
            None => Slug::for_shop(id),
        }
    }
}

/// Outcome of [`backfill_shop_slugs`].
#[derive(Debug, Default)]
pub struct BackfillReport {
    /// Shops that received a slug.
    pub assigned: Vec<(ShopId, Slug)>,
    /// Shops that still have none, with the reason.
    pub failed: Vec<(ShopId, String)>,
}

/// Assign slugs to every shop left without one.
///
/// Each shop is handled independently; a failure is recorded and the rest
/// continue.
///
/// # Errors
///
/// Returns `StoreError` only if the shops without a slug cannot be listed.
pub async fn backfill_shop_slugs(store: &dyn DirectoryStore) -> Result<BackfillReport, StoreError> {
    let mut report = BackfillReport::default();

    for (id, name) in store.shops_missing_slug().await? {
        match assign(store, id, &name).await {
            Ok(slug) => {
                tracing::info!(shop_id = %id, slug = %slug, "Slug assigned");
                report.assigned.push((id, slug));
            }
            Err(e) => {
                tracing::error!(shop_id = %id, error = %e, "Slug backfill failed");
                report.failed.push((id, e.to_string()));
            }
        }
    }

    Ok(report)
}

async fn assign(store: &dyn DirectoryStore, id: ShopId, name: &str) -> Result<Slug, StoreError> {
    let plan = SlugPlan::for_name(store, name).await?;
    // Only a free base slug can be lost to a concurrent write
    let fallback = plan.base.clone().filter(|_| !plan.taken);
    let slug = plan.resolve(id);

    match (store.set_shop_slug(id, &slug).await, fallback) {
        (Ok(()), _) => Ok(slug),
        (Err(StoreError::Conflict(_)), Some(base)) => {
            let slug = base.with_suffix(id);
            store.set_shop_slug(id, &slug).await?;
            Ok(slug)
        }
        (Err(e), _) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use inkmap_core::CityId;

    use super::*;
    use crate::db::MemoryStore;
    use crate::db::memory::StoreOperation;
    use crate::models::NewShop;

    fn new_shop(name: &str) -> NewShop {
        NewShop {
            name: name.to_string(),
            city_id: CityId::new(1),
            instagram_handle: None,
            address: None,
            contact: None,
            phone: None,
            website: None,
        }
    }

    #[tokio::test]
    async fn test_plan_uses_base_when_free() {
        let store = MemoryStore::new();
        let plan = SlugPlan::for_name(&store, "Ray's Tattoo Co.").await.unwrap();
        assert_eq!(plan.resolve(ShopId::new(7)).as_str(), "rays-tattoo-co");
    }

    #[tokio::test]
    async fn test_plan_suffixes_taken_slug() {
        let store = MemoryStore::new();
        let first = store.insert_shop(&new_shop("Ray's Tattoo Co.")).await.unwrap();
        store
            .set_shop_slug(first, &Slug::from_name("Ray's Tattoo Co.").unwrap())
            .await
            .unwrap();

        let plan = SlugPlan::for_name(&store, "Ray's Tattoo Co.").await.unwrap();
        assert_eq!(plan.resolve(ShopId::new(12)).as_str(), "rays-tattoo-co-12");
    }

    #[tokio::test]
    async fn test_plan_empty_name_uses_id() {
        let store = MemoryStore::new();
        let plan = SlugPlan::for_name(&store, "!!!").await.unwrap();
        assert_eq!(plan.resolve(ShopId::new(3)).as_str(), "shop-3");
    }

    #[tokio::test]
    async fn test_backfill_assigns_missing_slugs() {
        let store = MemoryStore::new();
        let a = store.insert_shop(&new_shop("Black Anchor")).await.unwrap();
        let b = store.insert_shop(&new_shop("Black Anchor")).await.unwrap();

        let report = backfill_shop_slugs(&store).await.unwrap();
        assert!(report.failed.is_empty());
        assert_eq!(report.assigned.len(), 2);
        assert_eq!(report.assigned[0], (a, Slug::from_name("black-anchor").unwrap()));
        assert_eq!(report.assigned[1].0, b);
        assert_eq!(report.assigned[1].1.as_str(), format!("black-anchor-{b}"));

        let again = backfill_shop_slugs(&store).await.unwrap();
        assert!(again.assigned.is_empty());
    }

    #[tokio::test]
    async fn test_backfill_does_not_retry_suffixed_slug() {
        let store = MemoryStore::new();
        let first = store.insert_shop(&new_shop("Black Anchor")).await.unwrap();
        let second = store.insert_shop(&new_shop("Black Anchor")).await.unwrap();
        let squatter = store.insert_shop(&new_shop("Other")).await.unwrap();
        let base = Slug::from_name("Black Anchor").unwrap();
        store.set_shop_slug(first, &base).await.unwrap();
        store
            .set_shop_slug(squatter, &base.with_suffix(second))
            .await
            .unwrap();
        let before = store.call_count(StoreOperation::SetShopSlug);

        let report = backfill_shop_slugs(&store).await.unwrap();

        assert!(report.assigned.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, second);
        assert_eq!(store.call_count(StoreOperation::SetShopSlug), before + 1);
    }

    #[tokio::test]
    async fn test_backfill_records_failures() {
        let store = MemoryStore::new();
        let id = store.insert_shop(&new_shop("Black Anchor")).await.unwrap();
        store.fail(StoreOperation::SetShopSlug);

        let report = backfill_shop_slugs(&store).await.unwrap();
        assert!(report.assigned.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, id);
    }
}
