//! Artist requests.

use serde::Deserialize;

use inkmap_core::{ArtistId, CityId, InstagramHandle, Patch, ShopId};

use super::{Required, ValidationError, id_patch, optional_id, optional_text, required_text_patch};

/// Body of `POST /api/addArtist`.
#[derive(Debug, Default, Deserialize)]
pub struct AddArtistRequest {
    pub name: Option<String>,
    pub city_id: Option<CityId>,
    pub instagram_handle: Option<String>,
    pub gender: Option<String>,
    pub url: Option<String>,
    pub contact: Option<String>,
    pub is_traveling: Option<bool>,
    /// Shop to link after the artist is created.
    pub shop_id: Option<ShopId>,
}

/// A validated artist insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub city_id: CityId,
    pub instagram_handle: Option<InstagramHandle>,
    pub gender: Option<String>,
    pub url: Option<String>,
    pub contact: Option<String>,
    pub is_traveling: bool,
}

impl AddArtistRequest {
    /// Validate required fields, returning the insert and the optional shop
    /// to link afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` listing `name` and/or `city_id`.
    pub fn validate(self) -> Result<(NewArtist, Option<ShopId>), ValidationError> {
        let mut required = Required::default();
        let name = required.text("name", self.name);
        let city_id = required.id("city_id", self.city_id);

        let (Some(name), Some(city_id)) = (name, city_id) else {
            return Err(required.into_error());
        };

        let artist = NewArtist {
            name,
            city_id,
            instagram_handle: self
                .instagram_handle
                .as_deref()
                .and_then(InstagramHandle::parse),
            gender: optional_text(self.gender),
            url: optional_text(self.url),
            contact: optional_text(self.contact),
            is_traveling: self.is_traveling.unwrap_or(false),
        };

        Ok((artist, optional_id(self.shop_id)))
    }
}

/// Body of `PUT /api/updateArtist`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArtistRequest {
    pub id: Option<ArtistId>,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub instagram_handle: Patch<String>,
    #[serde(default)]
    pub gender: Patch<String>,
    #[serde(default)]
    pub url: Patch<String>,
    #[serde(default)]
    pub contact: Patch<String>,
    #[serde(default)]
    pub city_id: Patch<CityId>,
    #[serde(default)]
    pub is_traveling: Patch<bool>,
    /// Replaces every shop link of the artist when present.
    #[serde(default)]
    pub shop_id: Patch<ShopId>,
}

/// Column changes for an artist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtistChanges {
    pub name: Patch<String>,
    pub instagram_handle: Patch<InstagramHandle>,
    pub gender: Patch<String>,
    pub url: Patch<String>,
    pub contact: Patch<String>,
    pub city_id: Patch<CityId>,
    /// Written as given; `null` is written as `false`.
    pub is_traveling: Option<bool>,
}

impl ArtistChanges {
    /// Returns `true` if no column is written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.instagram_handle.is_absent()
            && self.gender.is_absent()
            && self.url.is_absent()
            && self.contact.is_absent()
            && self.city_id.is_absent()
            && self.is_traveling.is_none()
    }
}

/// A validated artist update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistUpdate {
    pub id: ArtistId,
    pub changes: ArtistChanges,
    /// `Some(None)` removes every link, `Some(Some(shop))` replaces them with one.
    pub shop: Option<Option<ShopId>>,
}

impl UpdateArtistRequest {
    /// Validate the update.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `id` is missing, the name is cleared, or
    /// neither a column nor the shop link would change.
    pub fn validate(self) -> Result<ArtistUpdate, ValidationError> {
        let id = optional_id(self.id).ok_or(ValidationError::MissingId)?;

        let changes = ArtistChanges {
            name: required_text_patch("name", self.name)?,
            instagram_handle: self
                .instagram_handle
                .normalize(|h| InstagramHandle::parse(&h)),
            gender: self.gender.into_text(),
            url: self.url.into_text(),
            contact: self.contact.into_text(),
            city_id: id_patch(self.city_id),
            is_traveling: match self.is_traveling {
                Patch::Absent => None,
                Patch::Clear => Some(false),
                Patch::Set(value) => Some(value),
            },
        };
        let shop = id_patch(self.shop_id).into_change();

        if changes.is_empty() && shop.is_none() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(ArtistUpdate { id, changes, shop })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse<T: for<'de> Deserialize<'de>>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_add_artist_defaults() {
        let (artist, shop) = parse::<AddArtistRequest>(
            r#"{"name": "Mira", "city_id": 5, "instagram_handle": "@@mira.ink"}"#,
        )
        .validate()
        .unwrap();
        assert!(!artist.is_traveling);
        assert_eq!(artist.instagram_handle.unwrap().as_str(), "mira.ink");
        assert_eq!(shop, None);
    }

    #[test]
    fn test_add_artist_with_shop() {
        let (_, shop) = parse::<AddArtistRequest>(r#"{"name": "Mira", "city_id": 5, "shop_id": 8}"#)
            .validate()
            .unwrap();
        assert_eq!(shop, Some(ShopId::new(8)));
    }

    #[test]
    fn test_add_artist_missing_fields() {
        let err = parse::<AddArtistRequest>("{}").validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: name, city_id");
    }

    #[test]
    fn test_update_artist_only_shop_is_valid() {
        let update = parse::<UpdateArtistRequest>(r#"{"id": 4, "shop_id": null}"#)
            .validate()
            .unwrap();
        assert!(update.changes.is_empty());
        assert_eq!(update.shop, Some(None));

        let update = parse::<UpdateArtistRequest>(r#"{"id": 4, "shop_id": 0}"#)
            .validate()
            .unwrap();
        assert_eq!(update.shop, Some(None));

        let update = parse::<UpdateArtistRequest>(r#"{"id": 4, "shop_id": 2}"#)
            .validate()
            .unwrap();
        assert_eq!(update.shop, Some(Some(ShopId::new(2))));
    }

    #[test]
    fn test_update_artist_absent_shop_leaves_links() {
        let update = parse::<UpdateArtistRequest>(r#"{"id": 4, "gender": ""}"#)
            .validate()
            .unwrap();
        assert_eq!(update.shop, None);
        assert_eq!(update.changes.gender, Patch::Clear);
    }

    #[test]
    fn test_update_artist_false_is_written() {
        let update = parse::<UpdateArtistRequest>(r#"{"id": 4, "is_traveling": false}"#)
            .validate()
            .unwrap();
        assert_eq!(update.changes.is_traveling, Some(false));
    }

    #[test]
    fn test_update_artist_only_id() {
        let err = parse::<UpdateArtistRequest>(r#"{"id": 4}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::NothingToUpdate);
    }
}
