//! Country, state and city requests.

use serde::Deserialize;

use inkmap_core::{CityId, CountryId, Patch, StateId};

use super::{Required, ValidationError, id_patch, optional_id, optional_text, required_text_patch};

// =============================================================================
// Countries
// =============================================================================

/// Body of `POST /api/addCountry`.
#[derive(Debug, Default, Deserialize)]
pub struct AddCountryRequest {
    pub name: Option<String>,
    pub country_code: Option<String>,
}

/// A validated country insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountry {
    pub name: String,
    /// Never `NULL`; empty when not supplied.
    pub country_code: String,
}

impl AddCountryRequest {
    /// Validate required fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` if `name` is missing.
    pub fn validate(self) -> Result<NewCountry, ValidationError> {
        let mut required = Required::default();
        let name = required.text("name", self.name);

        let Some(name) = name else {
            return Err(required.into_error());
        };

        Ok(NewCountry {
            name,
            country_code: optional_text(self.country_code).unwrap_or_default(),
        })
    }
}

/// Body of `PUT /api/updateCountry`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCountryRequest {
    pub id: Option<CountryId>,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub country_code: Patch<String>,
}

/// Column changes for a country.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountryChanges {
    pub name: Patch<String>,
    /// `Some("")` when the code is cleared; the column is never `NULL`.
    pub country_code: Option<String>,
}

impl CountryChanges {
    /// Returns `true` if no column is written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_absent() && self.country_code.is_none()
    }
}

impl UpdateCountryRequest {
    /// Validate the update.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `id` is missing, the name is cleared, or
    /// nothing would change.
    pub fn validate(self) -> Result<(CountryId, CountryChanges), ValidationError> {
        let id = optional_id(self.id).ok_or(ValidationError::MissingId)?;

        let changes = CountryChanges {
            name: required_text_patch("name", self.name)?,
            country_code: match self.country_code.into_text() {
                Patch::Absent => None,
                Patch::Clear => Some(String::new()),
                Patch::Set(code) => Some(code),
            },
        };

        if changes.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok((id, changes))
    }
}

// =============================================================================
// States
// =============================================================================

/// Body of `POST /api/addState`.
#[derive(Debug, Default, Deserialize)]
pub struct AddStateRequest {
    pub name: Option<String>,
    pub country_id: Option<CountryId>,
}

/// A validated state insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewState {
    pub name: String,
    pub country_id: Option<CountryId>,
}

impl AddStateRequest {
    /// Validate required fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` if `name` is missing.
    pub fn validate(self) -> Result<NewState, ValidationError> {
        let mut required = Required::default();
        let name = required.text("name", self.name);

        let Some(name) = name else {
            return Err(required.into_error());
        };

        Ok(NewState {
            name,
            country_id: optional_id(self.country_id),
        })
    }
}

// =============================================================================
// Cities
// =============================================================================

/// Body of `POST /api/addCity`.
#[derive(Debug, Default, Deserialize)]
pub struct AddCityRequest {
    pub name: Option<String>,
    pub state_id: Option<StateId>,
}

/// A validated city insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCity {
    pub name: String,
    pub state_id: Option<StateId>,
}

impl AddCityRequest {
    /// Validate required fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` if `name` is missing.
    pub fn validate(self) -> Result<NewCity, ValidationError> {
        let mut required = Required::default();
        let name = required.text("name", self.name);

        let Some(name) = name else {
            return Err(required.into_error());
        };

        Ok(NewCity {
            name,
            state_id: optional_id(self.state_id),
        })
    }
}

/// Body of `PUT /api/updateCity`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCityRequest {
    pub id: Option<CityId>,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub state_id: Patch<StateId>,
}

/// Column changes for a city.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CityChanges {
    pub name: Patch<String>,
    pub state_id: Patch<StateId>,
}

impl CityChanges {
    /// Returns `true` if no column is written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_absent() && self.state_id.is_absent()
    }
}

impl UpdateCityRequest {
    /// Validate the update.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `id` is missing, the name is cleared, or
    /// nothing would change.
    pub fn validate(self) -> Result<(CityId, CityChanges), ValidationError> {
        let id = optional_id(self.id).ok_or(ValidationError::MissingId)?;

        let changes = CityChanges {
            name: required_text_patch("name", self.name)?,
            state_id: id_patch(self.state_id),
        };

        if changes.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok((id, changes))
    }
}
