//! Records as returned by nested relational selects.
//!
//! Each record mirrors one row of its table plus the related rows embedded by
//! the select (city → state → country, artist ↔ shop through the link table).
//! To-one relations use [`Related`] because the embedding may arrive as an
//! object or as a one-element list. Flattening into listing rows lives in
//! [`crate::shape`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ArtistId, CityId, CountryId, ShopId, StateId, SubmissionId};
use super::related::Related;
use super::status::{SubmissionStatus, SubmissionType};

/// A country row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    /// Never null; empty when unknown.
    #[serde(default)]
    pub country_code: String,
}

/// A state row with its country embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNode {
    pub id: StateId,
    pub name: String,
    #[serde(default)]
    pub country: Option<Related<Country>>,
}

/// A city row with its state (and country) embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityNode {
    pub id: CityId,
    pub name: String,
    #[serde(default)]
    pub state: Option<Related<StateNode>>,
}

/// The shop side of an artist's link rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRef {
    pub id: ShopId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// The artist side of a shop's link rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: ArtistId,
    pub name: String,
}

/// One `artist_shops` row seen from the artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopLink {
    #[serde(default)]
    pub shop: Option<Related<ShopRef>>,
}

/// One `artist_shops` row seen from the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistLink {
    #[serde(default)]
    pub artist: Option<Related<ArtistRef>>,
}

/// An artist row with location and shop links embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistNode {
    pub id: ArtistId,
    pub name: String,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub is_traveling: bool,
    #[serde(default)]
    pub city_id: Option<CityId>,
    #[serde(default)]
    pub city: Option<Related<CityNode>>,
    #[serde(default)]
    pub artist_shops: Vec<ShopLink>,
}

/// A shop row with location and artist links embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopNode {
    pub id: ShopId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub city_id: Option<CityId>,
    #[serde(default)]
    pub city: Option<Related<CityNode>>,
    #[serde(default)]
    pub artist_shops: Vec<ArtistLink>,
}

/// A visitor submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub submission_type: SubmissionType,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub artist_id: Option<ArtistId>,
    pub artist_name: Option<String>,
    pub instagram_handle: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
}
