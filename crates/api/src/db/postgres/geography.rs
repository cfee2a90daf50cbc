//! Countries, states and cities.

use sqlx::PgPool;
use sqlx::types::Json;

use inkmap_core::{CityId, CityNode, Country, CountryId, StateId, StateNode};

use super::Assignments;
use crate::db::StoreError;
use crate::models::{CityChanges, CountryChanges, NewCity, NewCountry, NewState};

// =============================================================================
// Countries
// =============================================================================

/// Insert a country.
///
/// # Errors
///
/// Returns `StoreError::Database` if the insert fails.
pub(super) async fn insert_country(
    pool: &PgPool,
    country: &NewCountry,
) -> Result<CountryId, StoreError> {
    let id = sqlx::query_scalar::<_, CountryId>(
        r"
        INSERT INTO directory.countries (name, country_code)
        VALUES ($1, $2)
        RETURNING id
        ",
    )
    .bind(&country.name)
    .bind(&country.country_code)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Apply a partial update to a country.
///
/// # Errors
///
/// Returns `StoreError::Database` if the update fails.
pub(super) async fn update_country(
    pool: &PgPool,
    id: CountryId,
    changes: &CountryChanges,
) -> Result<u64, StoreError> {
    let mut update = Assignments::new("directory.countries");
    update.patch("name", changes.name.as_ref());
    if let Some(code) = &changes.country_code {
        update.set("country_code", code);
    }
    update.execute(id.as_i32(), pool).await
}

/// List every country by name.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub(super) async fn list_countries(pool: &PgPool) -> Result<Vec<Country>, StoreError> {
    let rows = sqlx::query_as::<_, (CountryId, String, String)>(
        r"
        SELECT id, name, country_code
        FROM directory.countries
        ORDER BY name, id
        ",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, country_code)| Country {
            id,
            name,
            country_code,
        })
        .collect())
}

// =============================================================================
// States
// =============================================================================

/// Insert a state.
///
/// # Errors
///
/// Returns `StoreError::Database` if the insert fails (including an unknown
/// `country_id`).
pub(super) async fn insert_state(pool: &PgPool, state: &NewState) -> Result<StateId, StoreError> {
    let id = sqlx::query_scalar::<_, StateId>(
        r"
        INSERT INTO directory.states (name, country_id)
        VALUES ($1, $2)
        RETURNING id
        ",
    )
    .bind(&state.name)
    .bind(state.country_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List every state with its country, by name.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails or a row cannot be decoded.
pub(super) async fn list_states(pool: &PgPool) -> Result<Vec<StateNode>, StoreError> {
    let rows = sqlx::query_scalar::<_, Json<StateNode>>(
        r"
        SELECT st.tree
        FROM directory.state_tree st
        JOIN directory.states s ON s.id = st.id
        ORDER BY s.name, s.id
        ",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|Json(state)| state).collect())
}

// =============================================================================
// Cities
// =============================================================================

/// Insert a city.
///
/// # Errors
///
/// Returns `StoreError::Database` if the insert fails (including an unknown
/// `state_id`).
pub(super) async fn insert_city(pool: &PgPool, city: &NewCity) -> Result<CityId, StoreError> {
    let id = sqlx::query_scalar::<_, CityId>(
        r"
        INSERT INTO directory.cities (name, state_id)
        VALUES ($1, $2)
        RETURNING id
        ",
    )
    .bind(&city.name)
    .bind(city.state_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Apply a partial update to a city.
///
/// # Errors
///
/// Returns `StoreError::Database` if the update fails.
pub(super) async fn update_city(
    pool: &PgPool,
    id: CityId,
    changes: &CityChanges,
) -> Result<u64, StoreError> {
    let mut update = Assignments::new("directory.cities");
    update
        .patch("name", changes.name.as_ref())
        .patch("state_id", changes.state_id.clone());
    update.execute(id.as_i32(), pool).await
}

/// List every city with state and country, by name.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails or a row cannot be decoded.
pub(super) async fn list_cities(pool: &PgPool) -> Result<Vec<CityNode>, StoreError> {
    let rows = sqlx::query_scalar::<_, Json<CityNode>>(
        r"
        SELECT ct.tree
        FROM directory.city_tree ct
        JOIN directory.cities c ON c.id = ct.id
        ORDER BY c.name, c.id
        ",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|Json(city)| city).collect())
}
