//! Artist handlers.

use axum::Json;
use serde::{Deserialize, Serialize};

use inkmap_core::shape::{ArtistListing, flatten_artist};
use inkmap_core::{ArtistId, PageRequest};

use super::extract::{JsonBody, QueryParams, Store};
use super::{WriteResponse, log_update};
use crate::error::{AppError, Result};
use crate::models::{AddArtistRequest, NewArtistShopLink, UpdateArtistRequest};

/// Query of `GET /api/artists`.
#[derive(Debug, Default, Deserialize)]
pub struct ArtistsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// One page of artists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistsPage {
    pub artists: Vec<ArtistListing>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

/// `GET /api/artists?page=&limit=`
pub async fn list_artists_page(
    Store(store): Store,
    QueryParams(query): QueryParams<ArtistsQuery>,
) -> Result<Json<ArtistsPage>> {
    let page = PageRequest::new(query.page, query.limit);

    let total = store
        .count_artists()
        .await
        .map_err(AppError::storage("Failed to fetch artists"))?;
    let artists = store
        .list_artists(Some(page))
        .await
        .map_err(AppError::storage("Failed to fetch artists"))?;

    Ok(Json(ArtistsPage {
        artists: artists.into_iter().map(flatten_artist).collect(),
        total,
        page: page.page(),
        limit: page.limit(),
        total_pages: page.total_pages(total),
    }))
}

/// `GET /api/listAllArtists`
pub async fn list_all_artists(Store(store): Store) -> Result<Json<Vec<ArtistListing>>> {
    let artists = store
        .list_artists(None)
        .await
        .map_err(AppError::storage("Failed to fetch artists"))?;

    Ok(Json(artists.into_iter().map(flatten_artist).collect()))
}

/// `POST /api/addArtist`
///
/// A `shop_id` in the body links the new artist to that shop. The link is
/// best-effort: a failure is logged and the artist is still reported as added.
pub async fn add_artist(
    Store(store): Store,
    JsonBody(body): JsonBody<AddArtistRequest>,
) -> Result<Json<WriteResponse<ArtistId>>> {
    let (artist, shop_id) = body.validate()?;

    let id = store
        .insert_artist(&artist)
        .await
        .map_err(AppError::storage("Failed to add artist"))?;
    tracing::info!(artist_id = %id, "Artist added");

    if let Some(shop_id) = shop_id {
        let link = NewArtistShopLink {
            artist_id: id,
            shop_id,
        };
        if let Err(e) = store.insert_artist_shop_link(&link).await {
            tracing::error!(
                artist_id = %id,
                shop_id = %shop_id,
                error = %e,
                "Artist added but shop link failed"
            );
        }
    }

    Ok(WriteResponse::added(id, "Artist"))
}

/// `PUT /api/updateArtist`
///
/// A `shop_id` key replaces every shop link of the artist: `null` or `0`
/// removes them all, any other id leaves exactly that one. Through this
/// endpoint an artist has at most one shop. The column update is
/// authoritative; a failed link replacement is logged and the previous
/// links are kept.
pub async fn update_artist(
    Store(store): Store,
    JsonBody(body): JsonBody<UpdateArtistRequest>,
) -> Result<Json<WriteResponse<ArtistId>>> {
    let update = body.validate()?;
    let id = update.id;

    if !update.changes.is_empty() {
        let rows = store
            .update_artist(id, &update.changes)
            .await
            .map_err(AppError::storage("Failed to update artist"))?;
        log_update("artist", id, rows);
    }

    if let Some(shop) = update.shop
        && let Err(e) = store.replace_artist_shop(id, shop).await
    {
        tracing::error!(
            artist_id = %id,
            shop_id = ?shop,
            error = %e,
            "Artist updated but shop links could not be replaced"
        );
    }

    Ok(WriteResponse::updated(id, "Artist"))
}
