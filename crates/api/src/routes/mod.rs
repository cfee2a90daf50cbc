//! HTTP route handlers.
//!
//! Every endpoint lives under `/api/<name>` and accepts exactly one method.
//! Other methods get `405 {"error": "Method not allowed"}`; `OPTIONS` is
//! answered by the per-endpoint CORS layer.
//!
//! # Route Structure
//!
//! ```text
//! POST  /api/addCountry          POST  /api/addState         POST /api/addCity
//! POST  /api/addShop             POST  /api/addArtist        POST /api/addArtistShopLink
//! POST  /api/addSubmission
//! PUT   /api/updateArtist        PUT   /api/updateCity       PUT  /api/updateCountry
//! PUT   /api/updateShop          PATCH /api/updateSubmission
//! GET   /api/artists?page&limit  GET   /api/listAllArtists   GET  /api/listAllShops
//! GET   /api/listCities          GET   /api/listStates       GET  /api/listCountries
//! GET   /api/listSubmissions?type
//! ```

pub mod artists;
pub mod cities;
pub mod countries;
pub mod extract;
pub mod health;
pub mod links;
pub mod shops;
pub mod states;
pub mod submissions;

use std::fmt::Display;

use axum::{
    Json, Router,
    http::{Method, StatusCode},
    routing::{MethodRouter, get, patch, post, put},
};
use serde::Serialize;

use crate::error::ErrorBody;
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Build the `/api` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Create
        .route("/addCountry", endpoint(post(countries::add_country), Method::POST))
        .route("/addState", endpoint(post(states::add_state), Method::POST))
        .route("/addCity", endpoint(post(cities::add_city), Method::POST))
        .route("/addShop", endpoint(post(shops::add_shop), Method::POST))
        .route("/addArtist", endpoint(post(artists::add_artist), Method::POST))
        .route(
            "/addArtistShopLink",
            endpoint(post(links::add_artist_shop_link), Method::POST),
        )
        .route(
            "/addSubmission",
            endpoint(post(submissions::add_submission), Method::POST),
        )
        // Update
        .route("/updateArtist", endpoint(put(artists::update_artist), Method::PUT))
        .route("/updateCity", endpoint(put(cities::update_city), Method::PUT))
        .route(
            "/updateCountry",
            endpoint(put(countries::update_country), Method::PUT),
        )
        .route("/updateShop", endpoint(put(shops::update_shop), Method::PUT))
        .route(
            "/updateSubmission",
            endpoint(patch(submissions::update_submission), Method::PATCH),
        )
        // List
        .route("/artists", endpoint(get(artists::list_artists_page), Method::GET))
        .route(
            "/listAllArtists",
            endpoint(get(artists::list_all_artists), Method::GET),
        )
        .route("/listAllShops", endpoint(get(shops::list_all_shops), Method::GET))
        .route("/listCities", endpoint(get(cities::list_cities), Method::GET))
        .route("/listStates", endpoint(get(states::list_states), Method::GET))
        .route(
            "/listCountries",
            endpoint(get(countries::list_countries), Method::GET),
        )
        .route(
            "/listSubmissions",
            endpoint(get(submissions::list_submissions), Method::GET),
        )
}

/// Finish an endpoint: JSON 405 for other methods, CORS for its method.
fn endpoint(route: MethodRouter<AppState>, method: Method) -> MethodRouter<AppState> {
    route.fallback(method_not_allowed).layer(cors_layer(method))
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".to_string(),
            details: None,
        }),
    )
}

/// Fallback for unknown paths.
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
            details: None,
        }),
    )
}

// =============================================================================
// Write responses
// =============================================================================

/// Body returned by every create and update endpoint.
#[derive(Debug, Serialize)]
pub struct WriteResponse<Id> {
    pub success: bool,
    pub id: Id,
    pub message: String,
}

impl<Id> WriteResponse<Id> {
    /// `"<Entity> added successfully"`.
    pub fn added(id: Id, entity: &str) -> Json<Self> {
        Json(Self {
            success: true,
            id,
            message: format!("{entity} added successfully"),
        })
    }

    /// `"<Entity> updated successfully"`.
    pub fn updated(id: Id, entity: &str) -> Json<Self> {
        Json(Self {
            success: true,
            id,
            message: format!("{entity} updated successfully"),
        })
    }
}

/// Log the outcome of an update; no matching row is not an error.
fn log_update(entity: &'static str, id: impl Display, rows: u64) {
    if rows == 0 {
        tracing::warn!(entity, id = %id, "Update matched no row");
    } else {
        tracing::info!(entity, id = %id, "Updated");
    }
}
