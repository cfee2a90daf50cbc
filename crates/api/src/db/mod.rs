//! Data access for the directory.
//!
//! Handlers talk to storage through the [`DirectoryStore`] port. Two adapters
//! implement it:
//!
//! - [`PgDirectoryStore`] - `PostgreSQL` via sqlx (production)
//! - [`MemoryStore`] - in-process tables (tests and local demos)
//!
//! ## Tables (schema `directory`)
//!
//! - `countries`, `states`, `cities` - location hierarchy
//! - `shops`, `artists` - listings
//! - `artist_shops` - artist <-> shop links, unique per pair
//! - `submissions` - visitor reports and suggestions
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p inkmap-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PgDirectoryStore, create_pool};

use async_trait::async_trait;
use thiserror::Error;

use inkmap_core::{
    ArtistId, ArtistNode, ArtistShopId, CityId, CityNode, Country, CountryId, PageRequest,
    ShopId, ShopNode, Slug, StateId, StateNode, Submission, SubmissionId, SubmissionStatus,
    SubmissionType,
};

use crate::models::{
    ArtistChanges, CityChanges, CountryChanges, NewArtist, NewArtistShopLink, NewCity, NewCountry,
    NewShop, NewState, NewSubmission, ShopChanges,
};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., duplicate artist-shop link).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The store cannot serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Port for every read and write the handlers perform.
///
/// Update methods return the number of rows affected; `0` means the id did
/// not match a row.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Check that the store can answer queries.
    async fn ping(&self) -> Result<(), StoreError>;

    // ----- Countries -----

    async fn insert_country(&self, country: &NewCountry) -> Result<CountryId, StoreError>;
    async fn update_country(
        &self,
        id: CountryId,
        changes: &CountryChanges,
    ) -> Result<u64, StoreError>;
    /// All countries ordered by name.
    async fn list_countries(&self) -> Result<Vec<Country>, StoreError>;

    // ----- States -----

    async fn insert_state(&self, state: &NewState) -> Result<StateId, StoreError>;
    /// All states with their country, ordered by name.
    async fn list_states(&self) -> Result<Vec<StateNode>, StoreError>;

    // ----- Cities -----

    async fn insert_city(&self, city: &NewCity) -> Result<CityId, StoreError>;
    async fn update_city(&self, id: CityId, changes: &CityChanges) -> Result<u64, StoreError>;
    /// All cities with state and country, ordered by name.
    async fn list_cities(&self) -> Result<Vec<CityNode>, StoreError>;

    // ----- Shops -----

    /// Whether any shop already holds `slug`.
    async fn shop_slug_exists(&self, slug: &Slug) -> Result<bool, StoreError>;
    /// Insert a shop without a slug.
    async fn insert_shop(&self, shop: &NewShop) -> Result<ShopId, StoreError>;
    async fn set_shop_slug(&self, id: ShopId, slug: &Slug) -> Result<(), StoreError>;
    async fn update_shop(&self, id: ShopId, changes: &ShopChanges) -> Result<u64, StoreError>;
    /// All shops with city tree and linked artists, ordered by name.
    async fn list_shops(&self) -> Result<Vec<ShopNode>, StoreError>;
    /// Shops whose slug was never assigned, as `(id, name)`.
    async fn shops_missing_slug(&self) -> Result<Vec<(ShopId, String)>, StoreError>;

    // ----- Artists -----

    async fn insert_artist(&self, artist: &NewArtist) -> Result<ArtistId, StoreError>;
    async fn update_artist(
        &self,
        id: ArtistId,
        changes: &ArtistChanges,
    ) -> Result<u64, StoreError>;
    async fn count_artists(&self) -> Result<u64, StoreError>;
    /// Artists with city tree and shop links, ordered by name then id.
    /// `None` returns every artist.
    async fn list_artists(&self, page: Option<PageRequest>)
    -> Result<Vec<ArtistNode>, StoreError>;

    // ----- Artist-shop links -----

    async fn artist_shop_link_exists(&self, link: &NewArtistShopLink)
    -> Result<bool, StoreError>;
    /// Insert a link.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the pair is already linked.
    async fn insert_artist_shop_link(
        &self,
        link: &NewArtistShopLink,
    ) -> Result<ArtistShopId, StoreError>;
    /// Delete every link of the artist, then link `shop` if given, atomically.
    async fn replace_artist_shop(
        &self,
        artist_id: ArtistId,
        shop: Option<ShopId>,
    ) -> Result<(), StoreError>;

    // ----- Submissions -----

    async fn insert_submission(
        &self,
        submission: &NewSubmission,
    ) -> Result<SubmissionId, StoreError>;
    async fn update_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<u64, StoreError>;
    /// Submissions newest first, optionally of one type.
    async fn list_submissions(
        &self,
        submission_type: Option<SubmissionType>,
    ) -> Result<Vec<Submission>, StoreError>;
}
