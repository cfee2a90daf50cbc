//! Visitor submission requests.

use serde::Deserialize;

use inkmap_core::{ArtistId, InstagramHandle, SubmissionId, SubmissionStatus, SubmissionType};

use super::{Required, ValidationError, optional_id, optional_text};

/// Body of `POST /api/addSubmission`.
#[derive(Debug, Default, Deserialize)]
pub struct AddSubmissionRequest {
    pub submission_type: Option<String>,
    pub artist_id: Option<ArtistId>,
    pub artist_name: Option<String>,
    pub instagram_handle: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
}

/// A validated submission insert. Status always starts at `new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub submission_type: SubmissionType,
    pub artist_id: Option<ArtistId>,
    pub artist_name: Option<String>,
    pub instagram_handle: Option<InstagramHandle>,
    pub location: Option<String>,
    pub message: Option<String>,
}

impl AddSubmissionRequest {
    /// Validate the type and normalize the payload.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` if `submission_type` is missing,
    /// or `ValidationError::NotAllowed` if it is not a known type.
    pub fn validate(self) -> Result<NewSubmission, ValidationError> {
        let mut required = Required::default();
        let Some(kind) = required.text("submission_type", self.submission_type) else {
            return Err(required.into_error());
        };
        let submission_type = parse_submission_type(&kind)?;

        Ok(NewSubmission {
            submission_type,
            artist_id: optional_id(self.artist_id),
            artist_name: optional_text(self.artist_name),
            instagram_handle: self
                .instagram_handle
                .as_deref()
                .and_then(InstagramHandle::parse),
            location: optional_text(self.location),
            message: optional_text(self.message),
        })
    }
}

/// Body of `PATCH /api/updateSubmission`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubmissionRequest {
    pub id: Option<SubmissionId>,
    pub status: Option<String>,
}

impl UpdateSubmissionRequest {
    /// Validate the id and the status whitelist.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingId` without an id, `MissingFields` without
    /// a status, and `NotAllowed` for a status outside the whitelist.
    pub fn validate(self) -> Result<(SubmissionId, SubmissionStatus), ValidationError> {
        let id = optional_id(self.id).ok_or(ValidationError::MissingId)?;

        let mut required = Required::default();
        let Some(status) = required.text("status", self.status) else {
            return Err(required.into_error());
        };
        let status = status
            .parse::<SubmissionStatus>()
            .map_err(|_| ValidationError::NotAllowed {
                field: "status",
                allowed: SubmissionStatus::allowed_values(),
            })?;

        Ok((id, status))
    }
}

/// Query of `GET /api/listSubmissions`.
#[derive(Debug, Default, Deserialize)]
pub struct ListSubmissionsQuery {
    #[serde(rename = "type")]
    pub submission_type: Option<String>,
}

impl ListSubmissionsQuery {
    /// The type filter, if one was given.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotAllowed` for an unknown type.
    pub fn validate(self) -> Result<Option<SubmissionType>, ValidationError> {
        optional_text(self.submission_type)
            .map(|kind| parse_submission_type(&kind))
            .transpose()
    }
}

fn parse_submission_type(value: &str) -> Result<SubmissionType, ValidationError> {
    value
        .parse::<SubmissionType>()
        .map_err(|_| ValidationError::NotAllowed {
            field: "submission_type",
            allowed: SubmissionType::ALL
                .iter()
                .map(SubmissionType::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse<T: for<'de> Deserialize<'de>>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_add_submission_requires_type() {
        let err = parse::<AddSubmissionRequest>(r#"{"message": "hi"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: submission_type");
    }

    #[test]
    fn test_add_submission_rejects_unknown_type() {
        let err = parse::<AddSubmissionRequest>(r#"{"submission_type": "complaint"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid submission_type. Must be one of: report, new_artist"
        );
    }

    #[test]
    fn test_add_submission_normalizes_handle() {
        let submission = parse::<AddSubmissionRequest>(
            r#"{"submission_type": "new_artist", "instagram_handle": "@newface", "artist_id": 0}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(submission.submission_type, SubmissionType::NewArtist);
        assert_eq!(submission.instagram_handle.unwrap().as_str(), "newface");
        assert_eq!(submission.artist_id, None);
    }

    #[test]
    fn test_update_submission_whitelist() {
        let (id, status) = parse::<UpdateSubmissionRequest>(r#"{"id": 7, "status": "in_progress"}"#)
            .validate()
            .unwrap();
        assert_eq!(id, SubmissionId::new(7));
        assert_eq!(status, SubmissionStatus::InProgress);

        let err = parse::<UpdateSubmissionRequest>(r#"{"id": 7, "status": "archived"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { field: "status", .. }));
    }

    #[test]
    fn test_update_submission_id_checked_first() {
        let err = parse::<UpdateSubmissionRequest>(r#"{"status": "archived"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingId);
    }

    #[test]
    fn test_list_submissions_type_filter() {
        assert_eq!(ListSubmissionsQuery::default().validate().unwrap(), None);
        let query = ListSubmissionsQuery {
            submission_type: Some("report".to_string()),
        };
        assert_eq!(query.validate().unwrap(), Some(SubmissionType::Report));
        let query = ListSubmissionsQuery {
            submission_type: Some("other".to_string()),
        };
        assert!(query.validate().is_err());
    }
}
