//! In-process [`DirectoryStore`] for tests and local demos.
//!
//! Tables live behind a mutex and mirror the `PostgreSQL` schema, including
//! the unique constraints on `artist_shops (artist_id, shop_id)` and
//! `shops (slug)`. Foreign keys are not enforced. Related rows are embedded
//! in list form, the other shape listing code has to accept.
//!
//! Any operation can be made to fail with [`MemoryStore::fail`] so tests can
//! exercise error paths and best-effort steps.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use inkmap_core::{
    ArtistId, ArtistLink, ArtistNode, ArtistRef, ArtistShopId, CityId, CityNode, Country,
    CountryId, PageRequest, Patch, Related, ShopId, ShopLink, ShopNode, ShopRef, Slug, StateId,
    StateNode, Submission, SubmissionId, SubmissionStatus, SubmissionType,
};

use super::{DirectoryStore, StoreError};
use crate::models::{
    ArtistChanges, CityChanges, CountryChanges, NewArtist, NewArtistShopLink, NewCity, NewCountry,
    NewShop, NewState, NewSubmission, ShopChanges,
};

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Ping,
    InsertCountry,
    UpdateCountry,
    ListCountries,
    InsertState,
    ListStates,
    InsertCity,
    UpdateCity,
    ListCities,
    ShopSlugExists,
    InsertShop,
    SetShopSlug,
    UpdateShop,
    ListShops,
    ShopsMissingSlug,
    InsertArtist,
    UpdateArtist,
    CountArtists,
    ListArtists,
    ArtistShopLinkExists,
    InsertArtistShopLink,
    ReplaceArtistShop,
    InsertSubmission,
    UpdateSubmissionStatus,
    ListSubmissions,
}

#[derive(Debug, Clone)]
struct StateRecord {
    id: StateId,
    name: String,
    country_id: Option<CountryId>,
}

#[derive(Debug, Clone)]
struct CityRecord {
    id: CityId,
    name: String,
    state_id: Option<StateId>,
}

#[derive(Debug, Clone)]
struct ShopRecord {
    id: ShopId,
    name: String,
    slug: Option<String>,
    instagram_handle: Option<String>,
    address: Option<String>,
    contact: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    city_id: Option<CityId>,
}

#[derive(Debug, Clone)]
struct ArtistRecord {
    id: ArtistId,
    name: String,
    instagram_handle: Option<String>,
    gender: Option<String>,
    url: Option<String>,
    contact: Option<String>,
    city_id: Option<CityId>,
    is_traveling: bool,
}

#[derive(Debug, Clone, Copy)]
struct LinkRecord {
    id: ArtistShopId,
    artist_id: ArtistId,
    shop_id: ShopId,
}

#[derive(Debug, Default)]
struct Tables {
    countries: Vec<Country>,
    states: Vec<StateRecord>,
    cities: Vec<CityRecord>,
    shops: Vec<ShopRecord>,
    artists: Vec<ArtistRecord>,
    links: Vec<LinkRecord>,
    submissions: Vec<Submission>,
    last_id: i32,
    writes: usize,
    calls: HashMap<StoreOperation, usize>,
    failing: HashSet<StoreOperation>,
}

/// Directory store held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `operation` fail with `StoreError::Unavailable`.
    pub fn fail(&self, operation: StoreOperation) {
        self.tables().failing.insert(operation);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.tables().writes
    }

    /// Number of times `operation` was called, failed calls included.
    #[must_use]
    pub fn call_count(&self, operation: StoreOperation) -> usize {
        self.tables().calls.get(&operation).copied().unwrap_or(0)
    }

    /// Shops linked to an artist, in link order.
    #[must_use]
    pub fn shops_of_artist(&self, artist_id: ArtistId) -> Vec<ShopId> {
        self.tables()
            .links
            .iter()
            .filter(|l| l.artist_id == artist_id)
            .map(|l| l.shop_id)
            .collect()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the tables for `operation`, failing if it was marked to fail.
    fn begin(&self, operation: StoreOperation) -> Result<MutexGuard<'_, Tables>, StoreError> {
        let mut tables = self.tables();
        *tables.calls.entry(operation).or_default() += 1;
        if tables.failing.contains(&operation) {
            return Err(StoreError::Unavailable(format!(
                "injected failure in {operation:?}"
            )));
        }
        Ok(tables)
    }
}

impl Tables {
    /// Next value of the shared id sequence, counted as a write.
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.writes += 1;
        self.last_id
    }

    fn country(&self, id: Option<CountryId>) -> Option<Country> {
        let id = id?;
        self.countries.iter().find(|c| c.id == id).cloned()
    }

    fn state_node(&self, id: Option<StateId>) -> Option<StateNode> {
        let id = id?;
        let state = self.states.iter().find(|s| s.id == id)?;
        Some(StateNode {
            id: state.id,
            name: state.name.clone(),
            country: self.country(state.country_id).map(|c| Related::Many(vec![c])),
        })
    }

    fn city_node(&self, id: Option<CityId>) -> Option<CityNode> {
        let id = id?;
        let city = self.cities.iter().find(|c| c.id == id)?;
        Some(CityNode {
            id: city.id,
            name: city.name.clone(),
            state: self.state_node(city.state_id).map(|s| Related::Many(vec![s])),
        })
    }

    fn artist_node(&self, artist: &ArtistRecord) -> ArtistNode {
        let artist_shops = self
            .links
            .iter()
            .filter(|l| l.artist_id == artist.id)
            .map(|l| ShopLink {
                shop: self
                    .shops
                    .iter()
                    .find(|s| s.id == l.shop_id)
                    .map(|s| {
                        Related::Many(vec![ShopRef {
                            id: s.id,
                            name: s.name.clone(),
                            slug: s.slug.clone(),
                        }])
                    }),
            })
            .collect();

        ArtistNode {
            id: artist.id,
            name: artist.name.clone(),
            instagram_handle: artist.instagram_handle.clone(),
            gender: artist.gender.clone(),
            url: artist.url.clone(),
            contact: artist.contact.clone(),
            is_traveling: artist.is_traveling,
            city_id: artist.city_id,
            city: self.city_node(artist.city_id).map(|c| Related::Many(vec![c])),
            artist_shops,
        }
    }

    fn shop_node(&self, shop: &ShopRecord) -> ShopNode {
        let artist_shops = self
            .links
            .iter()
            .filter(|l| l.shop_id == shop.id)
            .map(|l| ArtistLink {
                artist: self
                    .artists
                    .iter()
                    .find(|a| a.id == l.artist_id)
                    .map(|a| {
                        Related::Many(vec![ArtistRef {
                            id: a.id,
                            name: a.name.clone(),
                        }])
                    }),
            })
            .collect();

        ShopNode {
            id: shop.id,
            name: shop.name.clone(),
            slug: shop.slug.clone(),
            instagram_handle: shop.instagram_handle.clone(),
            address: shop.address.clone(),
            contact: shop.contact.clone(),
            phone: shop.phone.clone(),
            website: shop.website.clone(),
            city_id: shop.city_id,
            city: self.city_node(shop.city_id).map(|c| Related::Many(vec![c])),
            artist_shops,
        }
    }
}

/// Write a patch into a nullable column.
fn apply<T: Clone>(column: &mut Option<T>, patch: &Patch<T>) {
    if let Some(value) = patch.clone().into_change() {
        *column = value;
    }
}

/// Write a patch into a `NOT NULL` column; clearing is ignored.
fn apply_required<T: Clone>(column: &mut T, patch: &Patch<T>) {
    if let Patch::Set(value) = patch {
        *column = value.clone();
    }
}

fn sort_by_name<T>(rows: &mut [T], key: impl Fn(&T) -> (&str, i32)) {
    rows.sort_by(|a, b| key(a).cmp(&key(b)));
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let _tables = self.begin(StoreOperation::Ping)?;
        Ok(())
    }

    async fn insert_country(&self, country: &NewCountry) -> Result<CountryId, StoreError> {
        let mut tables = self.begin(StoreOperation::InsertCountry)?;
        let id = CountryId::new(tables.next_id());
        tables.countries.push(Country {
            id,
            name: country.name.clone(),
            country_code: country.country_code.clone(),
        });
        Ok(id)
    }

    async fn update_country(
        &self,
        id: CountryId,
        changes: &CountryChanges,
    ) -> Result<u64, StoreError> {
        let mut tables = self.begin(StoreOperation::UpdateCountry)?;
        let Some(country) = tables.countries.iter_mut().find(|c| c.id == id) else {
            return Ok(0);
        };
        apply_required(&mut country.name, &changes.name);
        if let Some(code) = &changes.country_code {
            country.country_code.clone_from(code);
        }
        tables.writes += 1;
        Ok(1)
    }

    async fn list_countries(&self) -> Result<Vec<Country>, StoreError> {
        let tables = self.begin(StoreOperation::ListCountries)?;
        let mut countries = tables.countries.clone();
        sort_by_name(&mut countries, |c| (c.name.as_str(), c.id.as_i32()));
        Ok(countries)
    }

    async fn insert_state(&self, state: &NewState) -> Result<StateId, StoreError> {
        let mut tables = self.begin(StoreOperation::InsertState)?;
        let id = StateId::new(tables.next_id());
        tables.states.push(StateRecord {
            id,
            name: state.name.clone(),
            country_id: state.country_id,
        });
        Ok(id)
    }

    async fn list_states(&self) -> Result<Vec<StateNode>, StoreError> {
        let tables = self.begin(StoreOperation::ListStates)?;
        let mut states: Vec<StateNode> = tables
            .states
            .iter()
            .filter_map(|s| tables.state_node(Some(s.id)))
            .collect();
        sort_by_name(&mut states, |s| (s.name.as_str(), s.id.as_i32()));
        Ok(states)
    }

    async fn insert_city(&self, city: &NewCity) -> Result<CityId, StoreError> {
        let mut tables = self.begin(StoreOperation::InsertCity)?;
        let id = CityId::new(tables.next_id());
        tables.cities.push(CityRecord {
            id,
            name: city.name.clone(),
            state_id: city.state_id,
        });
        Ok(id)
    }

    async fn update_city(&self, id: CityId, changes: &CityChanges) -> Result<u64, StoreError> {
        let mut tables = self.begin(StoreOperation::UpdateCity)?;
        let Some(city) = tables.cities.iter_mut().find(|c| c.id == id) else {
            return Ok(0);
        };
        apply_required(&mut city.name, &changes.name);
        apply(&mut city.state_id, &changes.state_id);
        tables.writes += 1;
        Ok(1)
    }

    async fn list_cities(&self) -> Result<Vec<CityNode>, StoreError> {
        let tables = self.begin(StoreOperation::ListCities)?;
        let mut cities: Vec<CityNode> = tables
            .cities
            .iter()
            .filter_map(|c| tables.city_node(Some(c.id)))
            .collect();
        sort_by_name(&mut cities, |c| (c.name.as_str(), c.id.as_i32()));
        Ok(cities)
    }

    async fn shop_slug_exists(&self, slug: &Slug) -> Result<bool, StoreError> {
        let tables = self.begin(StoreOperation::ShopSlugExists)?;
        Ok(tables
            .shops
            .iter()
            .any(|s| s.slug.as_deref() == Some(slug.as_str())))
    }

    async fn insert_shop(&self, shop: &NewShop) -> Result<ShopId, StoreError> {
        let mut tables = self.begin(StoreOperation::InsertShop)?;
        let id = ShopId::new(tables.next_id());
        tables.shops.push(ShopRecord {
            id,
            name: shop.name.clone(),
            slug: None,
            instagram_handle: shop
                .instagram_handle
                .as_ref()
                .map(|h| h.as_str().to_owned()),
            address: shop.address.clone(),
            contact: shop.contact.clone(),
            phone: shop.phone.clone(),
            website: shop.website.clone(),
            city_id: Some(shop.city_id),
        });
        Ok(id)
    }

    async fn set_shop_slug(&self, id: ShopId, slug: &Slug) -> Result<(), StoreError> {
        let mut tables = self.begin(StoreOperation::SetShopSlug)?;
        if tables
            .shops
            .iter()
            .any(|s| s.id != id && s.slug.as_deref() == Some(slug.as_str()))
        {
            return Err(StoreError::Conflict(format!("slug already taken: {slug}")));
        }
        if let Some(shop) = tables.shops.iter_mut().find(|s| s.id == id) {
            shop.slug = Some(slug.as_str().to_owned());
            tables.writes += 1;
        }
        Ok(())
    }

    async fn update_shop(&self, id: ShopId, changes: &ShopChanges) -> Result<u64, StoreError> {
        let mut tables = self.begin(StoreOperation::UpdateShop)?;
        let Some(shop) = tables.shops.iter_mut().find(|s| s.id == id) else {
            return Ok(0);
        };
        apply_required(&mut shop.name, &changes.name);
        apply(
            &mut shop.instagram_handle,
            &changes
                .instagram_handle
                .as_ref()
                .map(|h| h.as_str().to_owned()),
        );
        apply(&mut shop.address, &changes.address);
        apply(&mut shop.contact, &changes.contact);
        apply(&mut shop.phone, &changes.phone);
        apply(&mut shop.website, &changes.website);
        apply(&mut shop.city_id, &changes.city_id);
        tables.writes += 1;
        Ok(1)
    }

    async fn list_shops(&self) -> Result<Vec<ShopNode>, StoreError> {
        let tables = self.begin(StoreOperation::ListShops)?;
        let mut shops: Vec<ShopNode> = tables.shops.iter().map(|s| tables.shop_node(s)).collect();
        sort_by_name(&mut shops, |s| (s.name.as_str(), s.id.as_i32()));
        Ok(shops)
    }

    async fn shops_missing_slug(&self) -> Result<Vec<(ShopId, String)>, StoreError> {
        let tables = self.begin(StoreOperation::ShopsMissingSlug)?;
        Ok(tables
            .shops
            .iter()
            .filter(|s| s.slug.is_none())
            .map(|s| (s.id, s.name.clone()))
            .collect())
    }

    async fn insert_artist(&self, artist: &NewArtist) -> Result<ArtistId, StoreError> {
        let mut tables = self.begin(StoreOperation::InsertArtist)?;
        let id = ArtistId::new(tables.next_id());
        tables.artists.push(ArtistRecord {
            id,
            name: artist.name.clone(),
            instagram_handle: artist
                .instagram_handle
                .as_ref()
                .map(|h| h.as_str().to_owned()),
            gender: artist.gender.clone(),
            url: artist.url.clone(),
            contact: artist.contact.clone(),
            city_id: Some(artist.city_id),
            is_traveling: artist.is_traveling,
        });
        Ok(id)
    }

    async fn update_artist(
        &self,
        id: ArtistId,
        changes: &ArtistChanges,
    ) -> Result<u64, StoreError> {
        let mut tables = self.begin(StoreOperation::UpdateArtist)?;
        let Some(artist) = tables.artists.iter_mut().find(|a| a.id == id) else {
            return Ok(0);
        };
        apply_required(&mut artist.name, &changes.name);
        apply(
            &mut artist.instagram_handle,
            &changes
                .instagram_handle
                .as_ref()
                .map(|h| h.as_str().to_owned()),
        );
        apply(&mut artist.gender, &changes.gender);
        apply(&mut artist.url, &changes.url);
        apply(&mut artist.contact, &changes.contact);
        apply(&mut artist.city_id, &changes.city_id);
        if let Some(is_traveling) = changes.is_traveling {
            artist.is_traveling = is_traveling;
        }
        tables.writes += 1;
        Ok(1)
    }

    async fn count_artists(&self) -> Result<u64, StoreError> {
        let tables = self.begin(StoreOperation::CountArtists)?;
        Ok(u64::try_from(tables.artists.len()).unwrap_or(u64::MAX))
    }

    async fn list_artists(
        &self,
        page: Option<PageRequest>,
    ) -> Result<Vec<ArtistNode>, StoreError> {
        let tables = self.begin(StoreOperation::ListArtists)?;
        let mut artists: Vec<&ArtistRecord> = tables.artists.iter().collect();
        sort_by_name(&mut artists, |a| (a.name.as_str(), a.id.as_i32()));

        let (skip, take) = page.map_or((0, usize::MAX), |p| {
            (
                usize::try_from(p.offset()).unwrap_or(usize::MAX),
                usize::try_from(p.limit()).unwrap_or(usize::MAX),
            )
        });

        Ok(artists
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|a| tables.artist_node(a))
            .collect())
    }

    async fn artist_shop_link_exists(
        &self,
        link: &NewArtistShopLink,
    ) -> Result<bool, StoreError> {
        let tables = self.begin(StoreOperation::ArtistShopLinkExists)?;
        Ok(tables
            .links
            .iter()
            .any(|l| l.artist_id == link.artist_id && l.shop_id == link.shop_id))
    }

    async fn insert_artist_shop_link(
        &self,
        link: &NewArtistShopLink,
    ) -> Result<ArtistShopId, StoreError> {
        let mut tables = self.begin(StoreOperation::InsertArtistShopLink)?;
        if tables
            .links
            .iter()
            .any(|l| l.artist_id == link.artist_id && l.shop_id == link.shop_id)
        {
            return Err(StoreError::Conflict(
                "artist-shop link already exists".to_owned(),
            ));
        }
        let id = ArtistShopId::new(tables.next_id());
        tables.links.push(LinkRecord {
            id,
            artist_id: link.artist_id,
            shop_id: link.shop_id,
        });
        Ok(id)
    }

    async fn replace_artist_shop(
        &self,
        artist_id: ArtistId,
        shop: Option<ShopId>,
    ) -> Result<(), StoreError> {
        let mut tables = self.begin(StoreOperation::ReplaceArtistShop)?;
        tables.links.retain(|l| l.artist_id != artist_id);
        tables.writes += 1;
        if let Some(shop_id) = shop {
            let id = ArtistShopId::new(tables.next_id());
            tables.links.push(LinkRecord {
                id,
                artist_id,
                shop_id,
            });
        }
        tables.links.sort_by_key(|l| l.id);
        Ok(())
    }

    async fn insert_submission(
        &self,
        submission: &NewSubmission,
    ) -> Result<SubmissionId, StoreError> {
        let mut tables = self.begin(StoreOperation::InsertSubmission)?;
        let id = SubmissionId::new(tables.next_id());
        tables.submissions.push(Submission {
            id,
            submission_type: submission.submission_type,
            status: SubmissionStatus::New,
            created_at: Utc::now(),
            artist_id: submission.artist_id,
            artist_name: submission.artist_name.clone(),
            instagram_handle: submission
                .instagram_handle
                .as_ref()
                .map(|h| h.as_str().to_owned()),
            location: submission.location.clone(),
            message: submission.message.clone(),
        });
        Ok(id)
    }

    async fn update_submission_status(
        &self,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<u64, StoreError> {
        let mut tables = self.begin(StoreOperation::UpdateSubmissionStatus)?;
        let Some(submission) = tables.submissions.iter_mut().find(|s| s.id == id) else {
            return Ok(0);
        };
        submission.status = status;
        tables.writes += 1;
        Ok(1)
    }

    async fn list_submissions(
        &self,
        submission_type: Option<SubmissionType>,
    ) -> Result<Vec<Submission>, StoreError> {
        let tables = self.begin(StoreOperation::ListSubmissions)?;
        let mut submissions: Vec<Submission> = tables
            .submissions
            .iter()
            .filter(|s| submission_type.is_none_or(|t| s.submission_type == t))
            .cloned()
            .collect();
        submissions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(submissions)
    }
}
