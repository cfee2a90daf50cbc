//! Two-shape union for joined relations.

use serde::{Deserialize, Serialize};

/// A related row embedded in a nested select.
///
/// Depending on how a join is expressed, a to-one relation comes back either
/// as a single object or as a list holding that object. Both shapes are
/// accepted here and resolved with [`Related::into_first`].
///
/// ```
/// use inkmap_core::Related;
///
/// let one: Related<u8> = serde_json::from_str("3").unwrap();
/// let many: Related<u8> = serde_json::from_str("[3]").unwrap();
/// assert_eq!(one.into_first(), many.into_first());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related<T> {
    /// The relation arrived as a list.
    Many(Vec<T>),
    /// The relation arrived as a single row.
    One(T),
}

impl<T> Related<T> {
    /// The related row, if any.
    ///
    /// For the list shape only the first element is meaningful.
    #[must_use]
    pub fn into_first(self) -> Option<T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.into_iter().next(),
        }
    }

    /// Borrow the related row, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first(),
        }
    }
}

impl<T> From<T> for Related<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}
