//! Submission status and type enums.

use serde::{Deserialize, Serialize};

/// Review status of a visitor submission.
///
/// New submissions start as [`SubmissionStatus::New`]; moderators move them
/// through the remaining states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
    /// The submitted artist was added to the directory.
    Added,
    /// The reported listing was removed.
    Deleted,
}

impl SubmissionStatus {
    /// Every accepted status, in workflow order.
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::InProgress,
        Self::Resolved,
        Self::Closed,
        Self::Added,
        Self::Deleted,
    ];

    /// The value stored in the database and used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Added => "added",
            Self::Deleted => "deleted",
        }
    }

    /// Comma separated list of accepted values, for error messages.
    #[must_use]
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid submission status: {s}"))
    }
}

/// Kind of visitor submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    /// A problem report against an existing listing.
    Report,
    /// A suggestion for an artist missing from the directory.
    NewArtist,
}

impl SubmissionType {
    /// Every accepted submission type.
    pub const ALL: [Self; 2] = [Self::Report, Self::NewArtist];

    /// The value stored in the database and used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::NewArtist => "new_artist",
        }
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubmissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(Self::Report),
            "new_artist" => Ok(Self::NewArtist),
            _ => Err(format!("invalid submission type: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in SubmissionStatus::ALL {
            assert_eq!(status.as_str().parse::<SubmissionStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!("archived".parse::<SubmissionStatus>().is_err());
        assert!("NEW".parse::<SubmissionStatus>().is_err());
        assert!("".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&SubmissionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_allowed_values() {
        assert_eq!(
            SubmissionStatus::allowed_values(),
            "new, in_progress, resolved, closed, added, deleted"
        );
    }

    #[test]
    fn test_default_status_is_new() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::New);
    }

    #[test]
    fn test_submission_type_parse() {
        assert_eq!(
            "new_artist".parse::<SubmissionType>().unwrap(),
            SubmissionType::NewArtist
        );
        assert_eq!("report".parse::<SubmissionType>().unwrap(), SubmissionType::Report);
        assert!("spam".parse::<SubmissionType>().is_err());
    }
}
