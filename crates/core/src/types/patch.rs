//! Tri-state values for partial updates.

use serde::{Deserialize, Deserializer};

/// A field in a partial-update request body.
///
/// JSON distinguishes a key that is missing from a key that is present with
/// `null`. Update handlers must leave missing keys untouched, so the field
/// type has to keep all three cases apart:
///
/// - [`Patch::Absent`] - key not present, the column is not written
/// - [`Patch::Clear`] - key present with a falsy value, the column becomes `NULL`
/// - [`Patch::Set`] - key present with a value, the column is overwritten
///
/// Fields using this type must be annotated with `#[serde(default)]` so that
/// missing keys deserialize to `Absent`.
///
/// ```
/// use inkmap_core::Patch;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Body {
///     #[serde(default)]
///     name: Patch<String>,
/// }
///
/// let body: Body = serde_json::from_str("{}").unwrap();
/// assert!(body.name.is_absent());
///
/// let body: Body = serde_json::from_str(r#"{"name": null}"#).unwrap();
/// assert_eq!(body.name, Patch::Clear);
///
/// let body: Body = serde_json::from_str(r#"{"name": ""}"#).unwrap();
/// assert_eq!(body.name.into_text(), Patch::Clear);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present in the request.
    Absent,
    /// Key present with a falsy value.
    Clear,
    /// Key present with a value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Clear, Self::Set))
    }
}

impl<T> Patch<T> {
    /// Returns `true` if the key was missing from the request.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if the key was present, with or without a value.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Borrow the inner value.
    #[must_use]
    pub const fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(value),
        }
    }

    /// Map a set value, keeping `Absent` and `Clear` as they are.
    pub fn map<U, F>(self, f: F) -> Patch<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Absent => Patch::Absent,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(f(value)),
        }
    }

    /// Map a set value through a normalizer; a `None` result clears the column.
    pub fn normalize<U, F>(self, f: F) -> Patch<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        match self {
            Self::Absent => Patch::Absent,
            Self::Clear => Patch::Clear,
            Self::Set(value) => f(value).map_or(Patch::Clear, Patch::Set),
        }
    }

    /// Convert to the nested option used by storage layers.
    ///
    /// `None` means "do not write", `Some(None)` means "write `NULL`".
    #[must_use]
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }
}

impl Patch<String> {
    /// Trim a text value; blank strings clear the column.
    #[must_use]
    pub fn into_text(self) -> Self {
        self.normalize(|s| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        })
    }
}
