//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as
//! `{ "error": <category>, "details"?: <message> }`; server errors are
//! captured to Sentry before responding.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::models::ValidationError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database endpoint or service credential is not configured.
    #[error("Server configuration error")]
    Configuration,

    /// Request failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body is not valid JSON or has a wrongly typed field.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string could not be parsed.
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    /// Duplicate relationship.
    #[error("{0}")]
    Conflict(String),

    /// A store operation failed.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// Panics and any other failure.
    #[error("Internal server error: {0}")]
    Unexpected(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// Wrap a store error with the operation that failed.
    ///
    /// ```rust,ignore
    /// store.insert_city(&city).await.map_err(AppError::storage("Failed to add city"))?;
    /// ```
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Storage { context, source }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) | Self::InvalidQuery(_) | Self::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Configuration | Self::Storage { .. } | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            Self::Configuration => (
                self.to_string(),
                Some("database endpoint or service credential is not set".to_string()),
            ),
            Self::Validation(err) => (err.to_string(), None),
            Self::InvalidBody(details) => ("Invalid request body".to_string(), Some(details.clone())),
            Self::InvalidQuery(details) => {
                ("Invalid query parameters".to_string(), Some(details.clone()))
            }
            Self::Conflict(message) => (message.clone(), None),
            Self::Storage { context, source } => ((*context).to_string(), Some(source.to_string())),
            Self::Unexpected(details) => ("Internal server error".to_string(), Some(details.clone())),
        };
        ErrorBody { error, details }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let (status, body) = render(AppError::Validation(ValidationError::MissingFields(vec![
            "name", "city_id",
        ])))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: name, city_id");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_configuration_error_body() {
        let (status, body) = render(AppError::Configuration).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server configuration error");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_storage_error_forwards_details() {
        let err = AppError::storage("Failed to add city")(StoreError::Unavailable(
            "connection refused".to_string(),
        ));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to add city");
        assert_eq!(body["details"], "store unavailable: connection refused");
    }

    #[tokio::test]
    async fn test_conflict_is_bad_request() {
        let (status, body) =
            render(AppError::Conflict("Artist-shop link already exists".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Artist-shop link already exists");
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::InvalidBody("expected value".to_string());
        assert_eq!(err.to_string(), "Invalid request body: expected value");

        let err = AppError::Validation(ValidationError::MissingId);
        assert_eq!(err.to_string(), "Missing required field: id");
    }
}
