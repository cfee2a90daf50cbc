//! Request extractors.
//!
//! Handlers take [`Store`] before any body or query extractor, so a missing
//! configuration is reported before input validation.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;

use crate::db::DirectoryStore;
use crate::error::AppError;
use crate::state::AppState;

/// The configured directory store.
///
/// Rejects with `AppError::Configuration` when the database is not configured.
pub struct Store(pub Arc<dyn DirectoryStore>);

impl FromRequestParts<AppState> for Store {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state.store().cloned().map(Self)
    }
}

/// JSON body whose rejection renders as `400 Invalid request body`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query string whose rejection renders as `400 Invalid query parameters`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
