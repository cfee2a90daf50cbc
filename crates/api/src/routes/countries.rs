//! Country handlers.

use axum::Json;

use inkmap_core::{Country, CountryId};

use super::extract::{JsonBody, Store};
use super::{WriteResponse, log_update};
use crate::error::{AppError, Result};
use crate::models::{AddCountryRequest, UpdateCountryRequest};

/// `POST /api/addCountry`
pub async fn add_country(
    Store(store): Store,
    JsonBody(body): JsonBody<AddCountryRequest>,
) -> Result<Json<WriteResponse<CountryId>>> {
    let country = body.validate()?;

    let id = store
        .insert_country(&country)
        .await
        .map_err(AppError::storage("Failed to add country"))?;

    tracing::info!(country_id = %id, "Country added");
    Ok(WriteResponse::added(id, "Country"))
}

/// `PUT /api/updateCountry`
pub async fn update_country(
    Store(store): Store,
    JsonBody(body): JsonBody<UpdateCountryRequest>,
) -> Result<Json<WriteResponse<CountryId>>> {
    let (id, changes) = body.validate()?;

    let rows = store
        .update_country(id, &changes)
        .await
        .map_err(AppError::storage("Failed to update country"))?;

    log_update("country", id, rows);
    Ok(WriteResponse::updated(id, "Country"))
}

/// `GET /api/listCountries`
pub async fn list_countries(Store(store): Store) -> Result<Json<Vec<Country>>> {
    let countries = store
        .list_countries()
        .await
        .map_err(AppError::storage("Failed to fetch countries"))?;

    Ok(Json(countries))
}
