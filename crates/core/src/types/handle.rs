//! Instagram handle type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An Instagram handle, stored without the leading `@`.
///
/// ## Examples
///
/// ```
/// use inkmap_core::InstagramHandle;
///
/// let a = InstagramHandle::parse("@inkbyray").unwrap();
/// let b = InstagramHandle::parse("inkbyray").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "inkbyray");
///
/// // Nothing left after normalization
/// assert!(InstagramHandle::parse(" @ ").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct InstagramHandle(String);

impl InstagramHandle {
    /// Normalize a client-supplied handle.
    ///
    /// Surrounding whitespace and any leading `@` characters are removed.
    /// Returns `None` if the result is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let handle = s.trim().trim_start_matches('@').trim();

        if handle.is_empty() {
            None
        } else {
            Some(Self(handle.to_owned()))
        }
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the handle and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for InstagramHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for InstagramHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for InstagramHandle {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for InstagramHandle {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are written normalized
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for InstagramHandle {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_at() {
        assert_eq!(InstagramHandle::parse("@foo").unwrap().as_str(), "foo");
        assert_eq!(InstagramHandle::parse("foo").unwrap().as_str(), "foo");
    }

    #[test]
    fn test_strips_repeated_at_and_whitespace() {
        assert_eq!(InstagramHandle::parse("  @@foo ").unwrap().as_str(), "foo");
    }

    #[test]
    fn test_keeps_inner_characters() {
        assert_eq!(
            InstagramHandle::parse("@ink.by_ray").unwrap().as_str(),
            "ink.by_ray"
        );
    }

    #[test]
    fn test_empty() {
        assert!(InstagramHandle::parse("").is_none());
        assert!(InstagramHandle::parse("@").is_none());
        assert!(InstagramHandle::parse("   ").is_none());
    }

    #[test]
    fn test_serde_is_transparent() {
        let handle = InstagramHandle::parse("@foo").unwrap();
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"foo\"");
    }
}
