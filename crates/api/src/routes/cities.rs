//! City handlers.

use axum::Json;

use inkmap_core::CityId;
use inkmap_core::shape::{CityListing, flatten_city};

use super::extract::{JsonBody, Store};
use super::{WriteResponse, log_update};
use crate::error::{AppError, Result};
use crate::models::{AddCityRequest, UpdateCityRequest};

/// `POST /api/addCity`
pub async fn add_city(
    Store(store): Store,
    JsonBody(body): JsonBody<AddCityRequest>,
) -> Result<Json<WriteResponse<CityId>>> {
    let city = body.validate()?;

    let id = store
        .insert_city(&city)
        .await
        .map_err(AppError::storage("Failed to add city"))?;

    tracing::info!(city_id = %id, "City added");
    Ok(WriteResponse::added(id, "City"))
}

/// `PUT /api/updateCity`
pub async fn update_city(
    Store(store): Store,
    JsonBody(body): JsonBody<UpdateCityRequest>,
) -> Result<Json<WriteResponse<CityId>>> {
    let (id, changes) = body.validate()?;

    let rows = store
        .update_city(id, &changes)
        .await
        .map_err(AppError::storage("Failed to update city"))?;

    log_update("city", id, rows);
    Ok(WriteResponse::updated(id, "City"))
}

/// `GET /api/listCities`
pub async fn list_cities(Store(store): Store) -> Result<Json<Vec<CityListing>>> {
    let cities = store
        .list_cities()
        .await
        .map_err(AppError::storage("Failed to fetch cities"))?;

    Ok(Json(cities.into_iter().map(flatten_city).collect()))
}
