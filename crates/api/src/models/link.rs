//! Artist-shop link requests.

use serde::Deserialize;

use inkmap_core::{ArtistId, ShopId};

use super::{Required, ValidationError};

/// Body of `POST /api/addArtistShopLink`.
#[derive(Debug, Default, Deserialize)]
pub struct AddArtistShopLinkRequest {
    pub artist_id: Option<ArtistId>,
    pub shop_id: Option<ShopId>,
}

/// A validated link insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewArtistShopLink {
    pub artist_id: ArtistId,
    pub shop_id: ShopId,
}

impl AddArtistShopLinkRequest {
    /// Validate required fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` listing `artist_id` and/or `shop_id`.
    pub fn validate(self) -> Result<NewArtistShopLink, ValidationError> {
        let mut required = Required::default();
        let artist_id = required.id("artist_id", self.artist_id);
        let shop_id = required.id("shop_id", self.shop_id);

        let (Some(artist_id), Some(shop_id)) = (artist_id, shop_id) else {
            return Err(required.into_error());
        };

        Ok(NewArtistShopLink { artist_id, shop_id })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_link_requires_both_ids() {
        let request: AddArtistShopLinkRequest = serde_json::from_str(r#"{"shop_id": 0}"#).unwrap();
        let err = request.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: artist_id, shop_id");
    }

    #[test]
    fn test_link_valid() {
        let request: AddArtistShopLinkRequest =
            serde_json::from_str(r#"{"artist_id": 1, "shop_id": 2}"#).unwrap();
        assert_eq!(
            request.validate().unwrap(),
            NewArtistShopLink {
                artist_id: ArtistId::new(1),
                shop_id: ShopId::new(2),
            }
        );
    }
}
