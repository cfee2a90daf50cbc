//! Artist-shop link handlers.

use axum::Json;

use inkmap_core::ArtistShopId;

use super::WriteResponse;
use super::extract::{JsonBody, Store};
use crate::db::StoreError;
use crate::error::{AppError, Result};
use crate::models::AddArtistShopLinkRequest;

const LINK_EXISTS: &str = "Artist-shop link already exists";

/// `POST /api/addArtistShopLink`
///
/// An artist may be linked to any number of shops, but each pair only once.
/// A concurrent duplicate that passes the existence check is caught by the
/// unique constraint and reported the same way.
pub async fn add_artist_shop_link(
    Store(store): Store,
    JsonBody(body): JsonBody<AddArtistShopLinkRequest>,
) -> Result<Json<WriteResponse<ArtistShopId>>> {
    let link = body.validate()?;

    let exists = store
        .artist_shop_link_exists(&link)
        .await
        .map_err(AppError::storage("Failed to add artist-shop link"))?;
    if exists {
        return Err(AppError::Conflict(LINK_EXISTS.to_string()));
    }

    let id = store
        .insert_artist_shop_link(&link)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => AppError::Conflict(LINK_EXISTS.to_string()),
            other => AppError::storage("Failed to add artist-shop link")(other),
        })?;

    tracing::info!(
        link_id = %id,
        artist_id = %link.artist_id,
        shop_id = %link.shop_id,
        "Artist-shop link added"
    );
    Ok(WriteResponse::added(id, "Artist-shop link"))
}
