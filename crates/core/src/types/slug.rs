//! URL slugs for shops.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::ShopId;

/// A URL-safe shop slug.
///
/// Built from a shop name by:
///
/// 1. lowercasing
/// 2. stripping quote characters (`'`, `"`, `‘`, `’`, `“`, `”`)
/// 3. turning whitespace and underscores into `-`
/// 4. dropping everything that is not `a-z`, `0-9` or `-`
/// 5. collapsing runs of `-` and trimming them from both ends
/// 6. truncating to [`Slug::MAX_LENGTH`] characters
///
/// ## Examples
///
/// ```
/// use inkmap_core::{ShopId, Slug};
///
/// let slug = Slug::from_name("Ray's Tattoo Co.").unwrap();
/// assert_eq!(slug.as_str(), "rays-tattoo-co");
///
/// // Collisions are resolved with the shop's own id
/// assert_eq!(slug.with_suffix(ShopId::new(17)).as_str(), "rays-tattoo-co-17");
///
/// // Names without any usable characters produce no slug
/// assert!(Slug::from_name("!!!").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a base slug.
    pub const MAX_LENGTH: usize = 100;

    /// Derive the base slug for a shop name.
    ///
    /// Returns `None` when nothing survives normalization.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let mut slug = String::with_capacity(name.len());

        for c in name.to_lowercase().chars() {
            if matches!(c, '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201c}' | '\u{201d}') {
                continue;
            }

            let c = if c.is_whitespace() || c == '_' { '-' } else { c };

            if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
                continue;
            }

            if c == '-' && slug.ends_with('-') {
                continue;
            }

            slug.push(c);
        }

        let mut slug = slug.trim_matches('-').to_owned();
        // Only ASCII survives the filter above, so byte truncation is safe.
        slug.truncate(Self::MAX_LENGTH);

        if slug.is_empty() {
            None
        } else {
            Some(Self(slug))
        }
    }

    /// Fallback slug for a shop whose name yields no base slug.
    #[must_use]
    pub fn for_shop(id: ShopId) -> Self {
        Self(format!("shop-{id}"))
    }

    /// Append the shop id to resolve a collision with an existing slug.
    #[must_use]
    pub fn with_suffix(&self, id: ShopId) -> Self {
        Self(format!("{}-{id}", self.0))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
