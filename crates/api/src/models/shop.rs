//! Shop requests.

use serde::Deserialize;

use inkmap_core::{CityId, InstagramHandle, Patch, ShopId};

use super::{Required, ValidationError, id_patch, optional_id, optional_text, required_text_patch};

/// Body of `POST /api/addShop`.
#[derive(Debug, Default, Deserialize)]
pub struct AddShopRequest {
    pub name: Option<String>,
    pub city_id: Option<CityId>,
    pub instagram_handle: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// A validated shop insert. The slug is assigned after the row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShop {
    pub name: String,
    pub city_id: CityId,
    pub instagram_handle: Option<InstagramHandle>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl AddShopRequest {
    /// Validate required fields and normalize the handle.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` listing `name` and/or `city_id`.
    pub fn validate(self) -> Result<NewShop, ValidationError> {
        let mut required = Required::default();
        let name = required.text("name", self.name);
        let city_id = required.id("city_id", self.city_id);

        let (Some(name), Some(city_id)) = (name, city_id) else {
            return Err(required.into_error());
        };

        Ok(NewShop {
            name,
            city_id,
            instagram_handle: self
                .instagram_handle
                .as_deref()
                .and_then(InstagramHandle::parse),
            address: optional_text(self.address),
            contact: optional_text(self.contact),
            phone: optional_text(self.phone),
            website: optional_text(self.website),
        })
    }
}

/// Body of `PUT /api/updateShop`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateShopRequest {
    pub id: Option<ShopId>,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub instagram_handle: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
    #[serde(default)]
    pub contact: Patch<String>,
    #[serde(default)]
    pub phone: Patch<String>,
    #[serde(default)]
    pub website: Patch<String>,
    #[serde(default)]
    pub city_id: Patch<CityId>,
}

/// Column changes for a shop. The slug is never part of an update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShopChanges {
    pub name: Patch<String>,
    pub instagram_handle: Patch<InstagramHandle>,
    pub address: Patch<String>,
    pub contact: Patch<String>,
    pub phone: Patch<String>,
    pub website: Patch<String>,
    pub city_id: Patch<CityId>,
}

impl ShopChanges {
    /// Returns `true` if no column is written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.instagram_handle.is_absent()
            && self.address.is_absent()
            && self.contact.is_absent()
            && self.phone.is_absent()
            && self.website.is_absent()
            && self.city_id.is_absent()
    }
}

impl UpdateShopRequest {
    /// Validate the update.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `id` is missing, the name is cleared, or
    /// nothing would change.
    pub fn validate(self) -> Result<(ShopId, ShopChanges), ValidationError> {
        let id = optional_id(self.id).ok_or(ValidationError::MissingId)?;

        let changes = ShopChanges {
            name: required_text_patch("name", self.name)?,
            instagram_handle: self
                .instagram_handle
                .normalize(|h| InstagramHandle::parse(&h)),
            address: self.address.into_text(),
            contact: self.contact.into_text(),
            phone: self.phone.into_text(),
            website: self.website.into_text(),
            city_id: id_patch(self.city_id),
        };

        if changes.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok((id, changes))
    }
}
