//! Visitor submissions.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use inkmap_core::{ArtistId, Submission, SubmissionId, SubmissionStatus, SubmissionType};

use crate::db::StoreError;
use crate::models::NewSubmission;

/// Raw submission row; type and status are stored as text.
#[derive(Debug, sqlx::FromRow)]
struct SubmissionRow {
    id: SubmissionId,
    submission_type: String,
    status: String,
    created_at: DateTime<Utc>,
    artist_id: Option<ArtistId>,
    artist_name: Option<String>,
    instagram_handle: Option<String>,
    location: Option<String>,
    message: Option<String>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = StoreError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let submission_type = row.submission_type.parse::<SubmissionType>().map_err(|e| {
            StoreError::DataCorruption(format!("submission {}: {e}", row.id))
        })?;
        let status = row
            .status
            .parse::<SubmissionStatus>()
            .map_err(|e| StoreError::DataCorruption(format!("submission {}: {e}", row.id)))?;

        Ok(Self {
            id: row.id,
            submission_type,
            status,
            created_at: row.created_at,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            instagram_handle: row.instagram_handle,
            location: row.location,
            message: row.message,
        })
    }
}

/// Insert a submission with status `new`.
///
/// # Errors
///
/// Returns `StoreError::Database` if the insert fails.
pub(super) async fn insert_submission(
    pool: &PgPool,
    submission: &NewSubmission,
) -> Result<SubmissionId, StoreError> {
    let id = sqlx::query_scalar::<_, SubmissionId>(
        r"
        INSERT INTO directory.submissions
            (submission_type, status, artist_id, artist_name, instagram_handle, location, message)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        ",
    )
    .bind(submission.submission_type.as_str())
    .bind(SubmissionStatus::New.as_str())
    .bind(submission.artist_id)
    .bind(&submission.artist_name)
    .bind(&submission.instagram_handle)
    .bind(&submission.location)
    .bind(&submission.message)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Set the status of a submission.
///
/// # Errors
///
/// Returns `StoreError::Database` if the update fails.
pub(super) async fn update_status(
    pool: &PgPool,
    id: SubmissionId,
    status: SubmissionStatus,
) -> Result<u64, StoreError> {
    let result = sqlx::query("UPDATE directory.submissions SET status = $1 WHERE id = $2")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// List submissions newest first, optionally of one type.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
/// Returns `StoreError::DataCorruption` if a stored type or status is unknown.
pub(super) async fn list_submissions(
    pool: &PgPool,
    submission_type: Option<SubmissionType>,
) -> Result<Vec<Submission>, StoreError> {
    let rows = sqlx::query_as::<_, SubmissionRow>(
        r"
        SELECT id, submission_type, status, created_at, artist_id,
               artist_name, instagram_handle, location, message
        FROM directory.submissions
        WHERE $1::text IS NULL OR submission_type = $1
        ORDER BY created_at DESC, id DESC
        ",
    )
    .bind(submission_type.map(|t| t.as_str()))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Submission::try_from).collect()
}
