//! State handlers.

use axum::Json;

use inkmap_core::StateId;
use inkmap_core::shape::{StateListing, flatten_state};

use super::WriteResponse;
use super::extract::{JsonBody, Store};
use crate::error::{AppError, Result};
use crate::models::AddStateRequest;

/// `POST /api/addState`
pub async fn add_state(
    Store(store): Store,
    JsonBody(body): JsonBody<AddStateRequest>,
) -> Result<Json<WriteResponse<StateId>>> {
    let state = body.validate()?;

    let id = store
        .insert_state(&state)
        .await
        .map_err(AppError::storage("Failed to add state"))?;

    tracing::info!(state_id = %id, "State added");
    Ok(WriteResponse::added(id, "State"))
}

/// `GET /api/listStates`
pub async fn list_states(Store(store): Store) -> Result<Json<Vec<StateListing>>> {
    let states = store
        .list_states()
        .await
        .map_err(AppError::storage("Failed to fetch states"))?;

    Ok(Json(states.into_iter().map(flatten_state).collect()))
}
