//! Artists and artist-shop links.

use sqlx::PgPool;
use sqlx::types::Json;

use inkmap_core::{
    ArtistId, ArtistNode, ArtistShopId, CityId, CityNode, PageRequest, Related, ShopId, ShopLink,
};

use super::Assignments;
use crate::db::StoreError;
use crate::models::{ArtistChanges, NewArtist, NewArtistShopLink};

/// Row of the artist listing query.
#[derive(Debug, sqlx::FromRow)]
struct ArtistRow {
    id: ArtistId,
    name: String,
    instagram_handle: Option<String>,
    gender: Option<String>,
    url: Option<String>,
    contact: Option<String>,
    is_traveling: bool,
    city_id: Option<CityId>,
    city: Option<Json<Related<CityNode>>>,
    artist_shops: Json<Vec<ShopLink>>,
}

impl From<ArtistRow> for ArtistNode {
    fn from(row: ArtistRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            instagram_handle: row.instagram_handle,
            gender: row.gender,
            url: row.url,
            contact: row.contact,
            is_traveling: row.is_traveling,
            city_id: row.city_id,
            city: row.city.map(|Json(city)| city),
            artist_shops: row.artist_shops.0,
        }
    }
}

/// Insert an artist.
///
/// # Errors
///
/// Returns `StoreError::Database` if the insert fails (including an unknown
/// `city_id`).
pub(super) async fn insert_artist(
    pool: &PgPool,
    artist: &NewArtist,
) -> Result<ArtistId, StoreError> {
    let id = sqlx::query_scalar::<_, ArtistId>(
        r"
        INSERT INTO directory.artists
            (name, city_id, instagram_handle, gender, url, contact, is_traveling)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        ",
    )
    .bind(&artist.name)
    .bind(artist.city_id)
    .bind(&artist.instagram_handle)
    .bind(&artist.gender)
    .bind(&artist.url)
    .bind(&artist.contact)
    .bind(artist.is_traveling)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Apply a partial update to an artist.
///
/// # Errors
///
/// Returns `StoreError::Database` if the update fails.
pub(super) async fn update_artist(
    pool: &PgPool,
    id: ArtistId,
    changes: &ArtistChanges,
) -> Result<u64, StoreError> {
    let mut update = Assignments::new("directory.artists");
    update
        .patch("name", changes.name.as_ref())
        .patch("instagram_handle", changes.instagram_handle.as_ref())
        .patch("gender", changes.gender.as_ref())
        .patch("url", changes.url.as_ref())
        .patch("contact", changes.contact.as_ref())
        .patch("city_id", changes.city_id.clone());
    if let Some(is_traveling) = changes.is_traveling {
        update.set("is_traveling", is_traveling);
    }
    update.execute(id.as_i32(), pool).await
}

/// Count every artist.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub(super) async fn count_artists(pool: &PgPool) -> Result<u64, StoreError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM directory.artists")
        .fetch_one(pool)
        .await?;

    u64::try_from(count)
        .map_err(|_| StoreError::DataCorruption(format!("negative artist count: {count}")))
}

/// List artists with city tree and shop links, by name then id.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails or a row cannot be decoded.
pub(super) async fn list_artists(
    pool: &PgPool,
    page: Option<PageRequest>,
) -> Result<Vec<ArtistNode>, StoreError> {
    // LIMIT NULL returns every row
    let limit = page.map(|p| i64::from(p.limit()));
    let offset = page.map_or(0, |p| i64::try_from(p.offset()).unwrap_or(i64::MAX));

    let rows = sqlx::query_as::<_, ArtistRow>(
        r"
        SELECT
            a.id, a.name, a.instagram_handle, a.gender, a.url, a.contact,
            a.is_traveling, a.city_id,
            ct.tree AS city,
            COALESCE(
                (
                    SELECT json_agg(
                        json_build_object(
                            'shop', json_build_object('id', s.id, 'name', s.name, 'slug', s.slug)
                        )
                        ORDER BY l.id
                    )
                    FROM directory.artist_shops l
                    JOIN directory.shops s ON s.id = l.shop_id
                    WHERE l.artist_id = a.id
                ),
                '[]'::json
            ) AS artist_shops
        FROM directory.artists a
        LEFT JOIN directory.city_tree ct ON ct.id = a.city_id
        ORDER BY a.name, a.id
        LIMIT $1 OFFSET $2
        ",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ArtistNode::from).collect())
}

// =============================================================================
// Links
// =============================================================================

/// Check whether the artist is already linked to the shop.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub(super) async fn link_exists(
    pool: &PgPool,
    link: &NewArtistShopLink,
) -> Result<bool, StoreError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r"
        SELECT EXISTS (
            SELECT 1 FROM directory.artist_shops
            WHERE artist_id = $1 AND shop_id = $2
        )
        ",
    )
    .bind(link.artist_id)
    .bind(link.shop_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Insert a link.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the pair is already linked.
/// Returns `StoreError::Database` for other database errors.
pub(super) async fn insert_link(
    pool: &PgPool,
    link: &NewArtistShopLink,
) -> Result<ArtistShopId, StoreError> {
    sqlx::query_scalar::<_, ArtistShopId>(
        r"
        INSERT INTO directory.artist_shops (artist_id, shop_id)
        VALUES ($1, $2)
        RETURNING id
        ",
    )
    .bind(link.artist_id)
    .bind(link.shop_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return StoreError::Conflict("artist-shop link already exists".to_owned());
        }
        StoreError::Database(e)
    })
}

/// Replace every link of an artist with at most one shop.
///
/// Runs in a transaction: on failure the previous links are kept.
///
/// # Errors
///
/// Returns `StoreError::Database` if any statement fails.
pub(super) async fn replace_links(
    pool: &PgPool,
    artist_id: ArtistId,
    shop: Option<ShopId>,
) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM directory.artist_shops WHERE artist_id = $1")
        .bind(artist_id)
        .execute(&mut *tx)
        .await?;

    if let Some(shop_id) = shop {
        sqlx::query("INSERT INTO directory.artist_shops (artist_id, shop_id) VALUES ($1, $2)")
            .bind(artist_id)
            .bind(shop_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
