//! Request bodies and the validated write inputs they produce.
//!
//! Each handler deserializes a loosely typed request (every field optional),
//! then calls `validate()` to obtain a typed input for the store. Validation
//! reports every missing required field at once.

pub mod artist;
pub mod geography;
pub mod link;
pub mod shop;
pub mod submission;

pub use artist::*;
pub use geography::*;
pub use link::*;
pub use shop::*;
pub use submission::*;

use inkmap_core::Patch;
use thiserror::Error;

/// Client input rejected before any store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are absent, null, blank or zero.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// An update body without an `id`.
    #[error("Missing required field: id")]
    MissingId,

    /// An update body that changes nothing.
    #[error("No fields to update")]
    NothingToUpdate,

    /// A required column cannot be cleared by an update.
    #[error("Field cannot be empty: {0}")]
    CannotClear(&'static str),

    /// A value outside its whitelist.
    #[error("Invalid {field}. Must be one of: {allowed}")]
    NotAllowed {
        field: &'static str,
        allowed: String,
    },
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Collects missing required fields while reading a request.
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    /// A required text field: trimmed, blank counts as missing.
    pub(crate) fn text(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let value = optional_text(value);
        if value.is_none() {
            self.missing.push(field);
        }
        value
    }

    /// A required id field: `0` counts as missing.
    pub(crate) fn id<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T>
    where
        T: Copy + Into<i32>,
    {
        let value = optional_id(value);
        if value.is_none() {
            self.missing.push(field);
        }
        value
    }

    /// The error listing every field recorded as missing.
    pub(crate) fn into_error(self) -> ValidationError {
        ValidationError::MissingFields(self.missing)
    }
}

/// Trim an optional text field; blank values become `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}

/// Drop ids equal to `0`.
pub(crate) fn optional_id<T>(value: Option<T>) -> Option<T>
where
    T: Copy + Into<i32>,
{
    value.filter(|id| Into::<i32>::into(*id) != 0)
}

/// Normalize an id patch: `0` clears the column.
pub(crate) fn id_patch<T>(value: Patch<T>) -> Patch<T>
where
    T: Copy + Into<i32>,
{
    value.normalize(|id| (Into::<i32>::into(id) != 0).then_some(id))
}

/// Normalize a patch for a `NOT NULL` text column.
pub(crate) fn required_text_patch(
    field: &'static str,
    value: Patch<String>,
) -> Result<Patch<String>, ValidationError> {
    match value.into_text() {
        Patch::Clear => Err(ValidationError::CannotClear(field)),
        other => Ok(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use inkmap_core::CityId;

    use super::*;

    #[test]
    fn test_missing_fields_message_lists_all() {
        let err = ValidationError::MissingFields(vec!["name", "city_id"]);
        assert_eq!(err.to_string(), "Missing required fields: name, city_id");
    }

    #[test]
    fn test_required_collects_in_order() {
        let mut required = Required::default();
        assert!(required.text("name", Some("   ".to_string())).is_none());
        assert!(required.id("city_id", Some(CityId::new(0))).is_none());
        assert_eq!(
            required.into_error(),
            ValidationError::MissingFields(vec!["name", "city_id"])
        );
    }

    #[test]
    fn test_optional_text_trims() {
        assert_eq!(optional_text(Some("  Ink  ".to_string())), Some("Ink".to_string()));
        assert_eq!(optional_text(Some(String::new())), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_id_patch_zero_clears() {
        assert_eq!(id_patch(Patch::Set(CityId::new(0))), Patch::Clear);
        assert_eq!(id_patch(Patch::Set(CityId::new(4))), Patch::Set(CityId::new(4)));
        assert_eq!(id_patch::<CityId>(Patch::Absent), Patch::Absent);
    }

    #[test]
    fn test_required_text_patch_rejects_clear() {
        assert_eq!(
            required_text_patch("name", Patch::Set("  ".to_string())),
            Err(ValidationError::CannotClear("name"))
        );
        assert_eq!(
            required_text_patch("name", Patch::Set(" Ink ".to_string())),
            Ok(Patch::Set("Ink".to_string()))
        );
        assert_eq!(required_text_patch("name", Patch::Absent), Ok(Patch::Absent));
    }
}
