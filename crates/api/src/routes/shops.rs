//! Shop handlers.

use axum::Json;

use inkmap_core::ShopId;
use inkmap_core::shape::{ShopListing, flatten_shop};

use super::extract::{JsonBody, Store};
use super::{WriteResponse, log_update};
use crate::error::{AppError, Result};
use crate::models::{AddShopRequest, UpdateShopRequest};
use crate::services::slugs::SlugPlan;

/// `POST /api/addShop`
///
/// The slug is written after the insert because a taken base slug gets the
/// new id appended. A failed slug write is logged and the shop is still
/// reported as added.
pub async fn add_shop(
    Store(store): Store,
    JsonBody(body): JsonBody<AddShopRequest>,
) -> Result<Json<WriteResponse<ShopId>>> {
    let shop = body.validate()?;

    let plan = SlugPlan::for_name(store.as_ref(), &shop.name)
        .await
        .map_err(AppError::storage("Failed to add shop"))?;

    let id = store
        .insert_shop(&shop)
        .await
        .map_err(AppError::storage("Failed to add shop"))?;

    let slug = plan.resolve(id);
    match store.set_shop_slug(id, &slug).await {
        Ok(()) => tracing::info!(shop_id = %id, slug = %slug, "Shop added"),
        Err(e) => tracing::error!(
            shop_id = %id,
            slug = %slug,
            error = %e,
            "Shop added but slug could not be set"
        ),
    }

    Ok(WriteResponse::added(id, "Shop"))
}

/// `PUT /api/updateShop`
///
/// Renaming a shop keeps its slug.
pub async fn update_shop(
    Store(store): Store,
    JsonBody(body): JsonBody<UpdateShopRequest>,
) -> Result<Json<WriteResponse<ShopId>>> {
    let (id, changes) = body.validate()?;

    let rows = store
        .update_shop(id, &changes)
        .await
        .map_err(AppError::storage("Failed to update shop"))?;

    log_update("shop", id, rows);
    Ok(WriteResponse::updated(id, "Shop"))
}

/// `GET /api/listAllShops`
pub async fn list_all_shops(Store(store): Store) -> Result<Json<Vec<ShopListing>>> {
    let shops = store
        .list_shops()
        .await
        .map_err(AppError::storage("Failed to fetch shops"))?;

    Ok(Json(shops.into_iter().map(flatten_shop).collect()))
}
