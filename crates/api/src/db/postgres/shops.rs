//! Shops.

use sqlx::PgPool;
use sqlx::types::Json;

use inkmap_core::{ArtistLink, CityId, CityNode, Related, ShopId, ShopNode, Slug};

use super::Assignments;
use crate::db::StoreError;
use crate::models::{NewShop, ShopChanges};

/// Row of the shop listing query.
#[derive(Debug, sqlx::FromRow)]
struct ShopRow {
    id: ShopId,
    name: String,
    slug: Option<String>,
    instagram_handle: Option<String>,
    address: Option<String>,
    contact: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    city_id: Option<CityId>,
    city: Option<Json<Related<CityNode>>>,
    artist_shops: Json<Vec<ArtistLink>>,
}

impl From<ShopRow> for ShopNode {
    fn from(row: ShopRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            instagram_handle: row.instagram_handle,
            address: row.address,
            contact: row.contact,
            phone: row.phone,
            website: row.website,
            city_id: row.city_id,
            city: row.city.map(|Json(city)| city),
            artist_shops: row.artist_shops.0,
        }
    }
}

/// Check whether a slug is already taken.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub(super) async fn slug_exists(pool: &PgPool, slug: &Slug) -> Result<bool, StoreError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM directory.shops WHERE slug = $1)",
    )
    .bind(slug.as_str())
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Insert a shop. The slug column is left `NULL`.
///
/// # Errors
///
/// Returns `StoreError::Database` if the insert fails (including an unknown
/// `city_id`).
pub(super) async fn insert_shop(pool: &PgPool, shop: &NewShop) -> Result<ShopId, StoreError> {
    let id = sqlx::query_scalar::<_, ShopId>(
        r"
        INSERT INTO directory.shops
            (name, city_id, instagram_handle, address, contact, phone, website)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        ",
    )
    .bind(&shop.name)
    .bind(shop.city_id)
    .bind(&shop.instagram_handle)
    .bind(&shop.address)
    .bind(&shop.contact)
    .bind(&shop.phone)
    .bind(&shop.website)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Assign a slug to a shop.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if another shop holds the slug, or
/// `StoreError::Database` if the update fails.
pub(super) async fn set_slug(pool: &PgPool, id: ShopId, slug: &Slug) -> Result<(), StoreError> {
    sqlx::query("UPDATE directory.shops SET slug = $1 WHERE id = $2")
        .bind(slug.as_str())
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::Conflict(format!("slug already taken: {slug}"));
            }
            StoreError::Database(e)
        })?;

    Ok(())
}

/// Apply a partial update to a shop.
///
/// # Errors
///
/// Returns `StoreError::Database` if the update fails.
pub(super) async fn update_shop(
    pool: &PgPool,
    id: ShopId,
    changes: &ShopChanges,
) -> Result<u64, StoreError> {
    let mut update = Assignments::new("directory.shops");
    update
        .patch("name", changes.name.as_ref())
        .patch("instagram_handle", changes.instagram_handle.as_ref())
        .patch("address", changes.address.as_ref())
        .patch("contact", changes.contact.as_ref())
        .patch("phone", changes.phone.as_ref())
        .patch("website", changes.website.as_ref())
        .patch("city_id", changes.city_id.clone());
    update.execute(id.as_i32(), pool).await
}

/// List every shop with city tree and linked artists, by name.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails or a row cannot be decoded.
pub(super) async fn list_shops(pool: &PgPool) -> Result<Vec<ShopNode>, StoreError> {
    let rows = sqlx::query_as::<_, ShopRow>(
        r"
        SELECT
            s.id, s.name, s.slug, s.instagram_handle, s.address, s.contact,
            s.phone, s.website, s.city_id,
            ct.tree AS city,
            COALESCE(
                (
                    SELECT json_agg(
                        json_build_object(
                            'artist', json_build_object('id', a.id, 'name', a.name)
                        )
                        ORDER BY l.id
                    )
                    FROM directory.artist_shops l
                    JOIN directory.artists a ON a.id = l.artist_id
                    WHERE l.shop_id = s.id
                ),
                '[]'::json
            ) AS artist_shops
        FROM directory.shops s
        LEFT JOIN directory.city_tree ct ON ct.id = s.city_id
        ORDER BY s.name, s.id
        ",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ShopNode::from).collect())
}

/// Shops left without a slug, oldest first.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub(super) async fn missing_slug(pool: &PgPool) -> Result<Vec<(ShopId, String)>, StoreError> {
    let rows = sqlx::query_as::<_, (ShopId, String)>(
        "SELECT id, name FROM directory.shops WHERE slug IS NULL ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
