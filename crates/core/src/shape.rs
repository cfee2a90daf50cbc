//! Response shaping for listing endpoints.
//!
//! Nested records from [`crate::types::node`] are flattened into single-level
//! rows so clients never have to walk `city.state.country` themselves. Every
//! to-one relation is resolved through [`Related::into_first`], so a relation
//! delivered as an object and one delivered as a one-element list flatten to
//! the same row.

use serde::Serialize;

use crate::types::{
    ArtistId, ArtistNode, ArtistRef, CityId, CityNode, CountryId, Related, ShopId, ShopNode,
    StateId, StateNode,
};

/// Flat artist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistListing {
    pub id: ArtistId,
    pub name: String,
    pub instagram_handle: Option<String>,
    pub gender: Option<String>,
    pub url: Option<String>,
    pub contact: Option<String>,
    pub is_traveling: bool,
    pub city_id: Option<CityId>,
    pub city_name: Option<String>,
    pub state_name: Option<String>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub shop_id: Option<ShopId>,
    pub shop_name: Option<String>,
    pub shop_slug: Option<String>,
}

/// Flat shop row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopListing {
    pub id: ShopId,
    pub name: String,
    pub slug: Option<String>,
    pub instagram_handle: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub city_id: Option<CityId>,
    pub city_name: Option<String>,
    pub state_name: Option<String>,
    pub country_name: Option<String>,
    pub artists: Vec<ArtistRef>,
}

/// Flat city row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityListing {
    pub id: CityId,
    pub name: String,
    pub state_id: Option<StateId>,
    pub state_name: Option<String>,
    pub country_id: Option<CountryId>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
}

/// Flat state row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateListing {
    pub id: StateId,
    pub name: String,
    pub country_id: Option<CountryId>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
}

/// Location columns shared by every flattened row.
#[derive(Debug, Default)]
struct Place {
    city_name: Option<String>,
    state_id: Option<StateId>,
    state_name: Option<String>,
    country_id: Option<CountryId>,
    country_name: Option<String>,
    country_code: Option<String>,
}

impl Place {
    fn from_state(state: Option<Related<StateNode>>) -> Self {
        let Some(state) = state.and_then(Related::into_first) else {
            return Self::default();
        };
        let country = state.country.and_then(Related::into_first);

        Self {
            city_name: None,
            state_id: Some(state.id),
            state_name: Some(state.name),
            country_id: country.as_ref().map(|c| c.id),
            country_name: country.as_ref().map(|c| c.name.clone()),
            country_code: country.map(|c| c.country_code),
        }
    }

    fn from_city(city: Option<Related<CityNode>>) -> Self {
        let Some(city) = city.and_then(Related::into_first) else {
            return Self::default();
        };

        Self {
            city_name: Some(city.name),
            ..Self::from_state(city.state)
        }
    }
}

/// Flatten an artist with its location and first linked shop.
#[must_use]
pub fn flatten_artist(node: ArtistNode) -> ArtistListing {
    let place = Place::from_city(node.city);
    let shop = node
        .artist_shops
        .into_iter()
        .find_map(|link| link.shop.and_then(Related::into_first));

    ArtistListing {
        id: node.id,
        name: node.name,
        instagram_handle: node.instagram_handle,
        gender: node.gender,
        url: node.url,
        contact: node.contact,
        is_traveling: node.is_traveling,
        city_id: node.city_id,
        city_name: place.city_name,
        state_name: place.state_name,
        country_name: place.country_name,
        country_code: place.country_code,
        shop_id: shop.as_ref().map(|s| s.id),
        shop_name: shop.as_ref().map(|s| s.name.clone()),
        shop_slug: shop.and_then(|s| s.slug),
    }
}

/// Flatten a shop with its location and linked artists.
#[must_use]
pub fn flatten_shop(node: ShopNode) -> ShopListing {
    let place = Place::from_city(node.city);
    let artists = node
        .artist_shops
        .into_iter()
        .filter_map(|link| link.artist.and_then(Related::into_first))
        .collect();

    ShopListing {
        id: node.id,
        name: node.name,
        slug: node.slug,
        instagram_handle: node.instagram_handle,
        address: node.address,
        contact: node.contact,
        phone: node.phone,
        website: node.website,
        city_id: node.city_id,
        city_name: place.city_name,
        state_name: place.state_name,
        country_name: place.country_name,
        artists,
    }
}

/// Flatten a city with its state and country.
#[must_use]
pub fn flatten_city(node: CityNode) -> CityListing {
    let place = Place::from_state(node.state);

    CityListing {
        id: node.id,
        name: node.name,
        state_id: place.state_id,
        state_name: place.state_name,
        country_id: place.country_id,
        country_name: place.country_name,
        country_code: place.country_code,
    }
}

/// Flatten a state with its country.
#[must_use]
pub fn flatten_state(node: StateNode) -> StateListing {
    let country = node.country.and_then(Related::into_first);

    StateListing {
        id: node.id,
        name: node.name,
        country_id: country.as_ref().map(|c| c.id),
        country_name: country.as_ref().map(|c| c.name.clone()),
        country_code: country.map(|c| c.country_code),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn artist_json(city: serde_json::Value, shops: serde_json::Value) -> ArtistNode {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Ray",
            "instagram_handle": "inkbyray",
            "is_traveling": true,
            "city_id": 10,
            "city": city,
            "artist_shops": shops,
        }))
        .unwrap()
    }

    #[test]
    fn test_artist_object_and_list_shapes_flatten_identically() {
        let nested = json!({
            "id": 10,
            "name": "Austin",
            "state": {
                "id": 20,
                "name": "Texas",
                "country": { "id": 30, "name": "United States", "country_code": "US" }
            }
        });
        let listed = json!([{
            "id": 10,
            "name": "Austin",
            "state": [{
                "id": 20,
                "name": "Texas",
                "country": [{ "id": 30, "name": "United States", "country_code": "US" }]
            }]
        }]);
        let shops_object = json!([{ "shop": { "id": 5, "name": "Iron Lotus", "slug": "iron-lotus" } }]);
        let shops_list = json!([{ "shop": [{ "id": 5, "name": "Iron Lotus", "slug": "iron-lotus" }] }]);

        let a = flatten_artist(artist_json(nested, shops_object));
        let b = flatten_artist(artist_json(listed, shops_list));

        assert_eq!(a, b);
        assert_eq!(a.city_name.as_deref(), Some("Austin"));
        assert_eq!(a.state_name.as_deref(), Some("Texas"));
        assert_eq!(a.country_name.as_deref(), Some("United States"));
        assert_eq!(a.country_code.as_deref(), Some("US"));
        assert_eq!(a.shop_id, Some(ShopId::new(5)));
        assert_eq!(a.shop_slug.as_deref(), Some("iron-lotus"));
    }

    #[test]
    fn test_artist_without_location_or_shop() {
        let listing = flatten_artist(artist_json(json!(null), json!([])));
        assert!(listing.city_name.is_none());
        assert!(listing.country_code.is_none());
        assert!(listing.shop_id.is_none());
        assert!(listing.is_traveling);
    }

    #[test]
    fn test_empty_relation_list_is_no_relation() {
        let listing = flatten_artist(artist_json(json!([]), json!([{ "shop": [] }])));
        assert!(listing.city_name.is_none());
        assert!(listing.shop_name.is_none());
    }

    #[test]
    fn test_shop_collects_artists() {
        let node: ShopNode = serde_json::from_value(json!({
            "id": 5,
            "name": "Iron Lotus",
            "slug": "iron-lotus",
            "city_id": 10,
            "city": { "id": 10, "name": "Austin", "state": null },
            "artist_shops": [
                { "artist": { "id": 1, "name": "Ray" } },
                { "artist": [{ "id": 2, "name": "Mo" }] },
                { "artist": null }
            ]
        }))
        .unwrap();

        let listing = flatten_shop(node);
        assert_eq!(listing.city_name.as_deref(), Some("Austin"));
        assert!(listing.state_name.is_none());
        assert_eq!(
            listing.artists.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            ["Ray", "Mo"]
        );
    }

    #[test]
    fn test_city_and_state_flatten() {
        let city: CityNode = serde_json::from_value(json!({
            "id": 10,
            "name": "Austin",
            "state": [{ "id": 20, "name": "Texas", "country": { "id": 30, "name": "United States", "country_code": "" } }]
        }))
        .unwrap();
        let listing = flatten_city(city);
        assert_eq!(listing.state_id, Some(StateId::new(20)));
        assert_eq!(listing.country_id, Some(CountryId::new(30)));
        assert_eq!(listing.country_code.as_deref(), Some(""));

        let state: StateNode = serde_json::from_value(json!({ "id": 20, "name": "Texas" })).unwrap();
        let listing = flatten_state(state);
        assert!(listing.country_id.is_none());
    }
}
