//! `PostgreSQL` adapter for [`DirectoryStore`].
//!
//! Queries are checked at runtime (`query_as::<_, Row>`), so the crate builds
//! without a live database. Listing queries embed related rows as JSON
//! through the `directory.city_tree` and `directory.state_tree` views and
//! decode them with `sqlx::types::Json`.

mod artists;
mod geography;
mod shops;
mod submissions;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type};

use inkmap_core::{
    ArtistId, ArtistNode, ArtistShopId, CityId, CityNode, Country, CountryId, PageRequest, Patch,
    ShopId, ShopNode, Slug, StateId, StateNode, Submission, SubmissionId, SubmissionStatus,
    SubmissionType,
};

use super::{DirectoryStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::{
    ArtistChanges, CityChanges, CountryChanges, NewArtist, NewArtistShopLink, NewCity, NewCountry,
    NewShop, NewState, NewSubmission, ShopChanges,
};

/// Create a lazily connecting `PostgreSQL` pool.
///
/// The service credential is applied as the connection password, overriding
/// any password in the URL. No connection is opened until the first query.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database URL cannot be parsed.
pub fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(config.database_url.expose_secret())?
        .password(config.service_key.expose_secret());

    Ok(PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy_with(options))
}

/// Directory store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgDirectoryStore {
    pool: PgPool,
}

impl PgDirectoryStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DirectoryStore for PgDirectoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_country(&self, country: &NewCountry) -> Result<CountryId, StoreError> {
        geography::insert_country(&self.pool, country).await
    }

    async fn update_country(
        &self,
        id: CountryId,
        changes: &CountryChanges,
    ) -> Result<u64, StoreError> {
        geography::update_country(&self.pool, id, changes).await
    }

    async fn list_countries(&self) -> Result<Vec<Country>, StoreError> {
        geography::list_countries(&self.pool).await
    }

    async fn insert_state(&self, state: &NewState) -> Result<StateId, StoreError> {
        geography::insert_state(&self.pool, state).await
    }

    async fn list_states(&self) -> Result<Vec<StateNode>, StoreError> {
        geography::list_states(&self.pool).await
    }

    async fn insert_city(&self, city: &NewCity) -> Result<CityId, StoreError> {
        geography::insert_city(&self.pool, city).await
    }

    async fn update_city(&self, id: CityId, changes: &CityChanges) -> Result<u64, StoreError> {
        geography::update_city(&self.pool, id, changes).await
    }

    async fn list_cities(&self) -> Result<Vec<CityNode>, StoreError> {
        geography::list_cities(&self.pool).await
    }

    async fn shop_slug_exists(&self, slug: &Slug) -> Result<bool, StoreError> {
        shops::slug_exists(&self.pool, slug).await
    }

    async fn insert_shop(&self, shop: &NewShop) -> Result<ShopId, StoreError> {
        shops::insert_shop(&self.pool, shop).await
    }

    async fn set_shop_slug(&self, id: ShopId, slug: &Slug) -> Result<(), StoreError> {
        shops::set_slug(&self.pool, id, slug).await
    }

    async fn update_shop(&self, id: ShopId, changes: &ShopChanges) -> Result<u64, StoreError> {
        shops::update_shop(&self.pool, id, changes).await
    }

    async fn list_shops(&self) -> Result<Vec<ShopNode>, StoreError> {
        shops::list_shops(&self.pool).await
    }

    async fn shops_missing_slug(&self) -> Result<Vec<(ShopId, String)>, StoreError> {
        shops::missing_slug(&self.pool).await
    }

    async fn insert_artist(&self, artist: &NewArtist) -> Result<ArtistId, StoreError> {
        artists::insert_artist(&self.pool, artist).await
    }

    async fn update_artist(
        &self,
        id: ArtistId,
        changes: &ArtistChanges,
    ) -> Result<u64, StoreError> {
        artists::update_artist(&self.pool, id, changes).await
    }

    async fn count_artists(&self) -> Result<u64, StoreError> {
        artists::count_artists(&self.pool).await
    }

    async fn list_artists(
        &self,
        page: Option<PageRequest>,
    ) -> Result<Vec<ArtistNode>, StoreError> {
        artists::list_artists(&self.pool, page).await
    }

    async fn artist_shop_link_exists(
        &self,
        link: &NewArtistShopLink,
    ) -> Result<bool, StoreError> {
        artists::link_exists(&self.pool, link).await
    }

    async fn insert_artist_shop_link(
        &self,
        link: &NewArtistShopLink,
    ) -> Result<ArtistShopId, StoreError> {
        artists::insert_link(&self.pool, link).await
    }

    async fn replace_artist_shop(
        &self,
        artist_id: ArtistId,
        shop: Option<ShopId>,
    ) -> Result<(), StoreError> {
        artists::replace_links(&self.pool, artist_id, shop).await
    }

    async fn insert_submission(
        &self,
        submission: &NewSubmission,
    ) -> Result<SubmissionId, StoreError> {
        submissions::insert_submission(&self.pool, submission).await
    }

    async fn update_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<u64, StoreError> {
        submissions::update_status(&self.pool, id, status).await
    }

    async fn list_submissions(
        &self,
        submission_type: Option<SubmissionType>,
    ) -> Result<Vec<Submission>, StoreError> {
        submissions::list_submissions(&self.pool, submission_type).await
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Builder for `UPDATE <table> SET ... WHERE id = $n` with only the columns
/// present in a partial update.
pub(super) struct Assignments<'args> {
    builder: QueryBuilder<'args, Postgres>,
    columns: usize,
}

impl<'args> Assignments<'args> {
    pub(super) fn new(table: &str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {table} SET ")),
            columns: 0,
        }
    }

    /// Write `value` to `column`.
    pub(super) fn set<T>(&mut self, column: &str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if self.columns > 0 {
            self.builder.push(", ");
        }
        self.builder.push(column).push(" = ").push_bind(value);
        self.columns += 1;
        self
    }

    /// Write a patch: absent is skipped, clear writes `NULL`.
    pub(super) fn patch<T>(&mut self, column: &str, value: Patch<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(change) = value.into_change() {
            self.set(column, change);
        }
        self
    }

    /// Run the update against the row `id`, returning rows affected.
    pub(super) async fn execute(mut self, id: i32, pool: &PgPool) -> Result<u64, StoreError> {
        if self.columns == 0 {
            return Ok(0);
        }
        self.builder.push(" WHERE id = ").push_bind(id);
        let result = self.builder.build().execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_assignments_skip_absent_columns() {
        let name = "Ink House".to_string();
        let mut update = Assignments::new("directory.shops");
        update
            .patch("name", Patch::Set(&name))
            .patch::<&String>("phone", Patch::Absent)
            .patch::<&String>("website", Patch::Clear);

        assert_eq!(update.columns, 2);
        assert_eq!(
            update.builder.sql(),
            "UPDATE directory.shops SET name = $1, website = $2"
        );
    }

    #[tokio::test]
    async fn test_create_pool_rejects_bad_url() {
        let config = DatabaseConfig::from_parts(
            Some("not a url".to_string()),
            Some("service-key".to_string()),
        )
        .unwrap();
        assert!(create_pool(&config).is_err());
    }
}
