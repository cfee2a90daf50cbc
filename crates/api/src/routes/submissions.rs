//! Visitor submission handlers.

use axum::Json;

use inkmap_core::{Submission, SubmissionId};

use super::extract::{JsonBody, QueryParams, Store};
use super::{WriteResponse, log_update};
use crate::error::{AppError, Result};
use crate::models::{AddSubmissionRequest, ListSubmissionsQuery, UpdateSubmissionRequest};

/// `POST /api/addSubmission`
pub async fn add_submission(
    Store(store): Store,
    JsonBody(body): JsonBody<AddSubmissionRequest>,
) -> Result<Json<WriteResponse<SubmissionId>>> {
    let submission = body.validate()?;

    let id = store
        .insert_submission(&submission)
        .await
        .map_err(AppError::storage("Failed to add submission"))?;

    tracing::info!(
        submission_id = %id,
        submission_type = %submission.submission_type,
        "Submission added"
    );
    Ok(WriteResponse::added(id, "Submission"))
}

/// `PATCH /api/updateSubmission`
///
/// Only the status can change.
pub async fn update_submission(
    Store(store): Store,
    JsonBody(body): JsonBody<UpdateSubmissionRequest>,
) -> Result<Json<WriteResponse<SubmissionId>>> {
    let (id, status) = body.validate()?;

    let rows = store
        .update_submission_status(id, status)
        .await
        .map_err(AppError::storage("Failed to update submission"))?;

    log_update("submission", id, rows);
    Ok(WriteResponse::updated(id, "Submission"))
}

/// `GET /api/listSubmissions?type=`
pub async fn list_submissions(
    Store(store): Store,
    QueryParams(query): QueryParams<ListSubmissionsQuery>,
) -> Result<Json<Vec<Submission>>> {
    let submission_type = query.validate()?;

    let submissions = store
        .list_submissions(submission_type)
        .await
        .map_err(AppError::storage("Failed to fetch submissions"))?;

    Ok(Json(submissions))
}
