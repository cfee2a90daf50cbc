//! Shops, slugs and artist-shop links.

use axum::http::StatusCode;
use serde_json::json;

use inkmap_api::db::memory::StoreOperation;
use inkmap_integration_tests::TestApp;

#[tokio::test]
async fn test_add_shop_requires_name_and_city() {
    let app = TestApp::new();

    let response = app.post("/api/addShop", &json!({ "address": "1 Main St" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Missing required fields: name, city_id");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_shop_slug_and_handle_normalization() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;

    let id = app
        .create(
            "/api/addShop",
            &json!({
                "name": "Ray's Tattoo Co.",
                "city_id": city_id,
                "instagram_handle": "@raystattoo",
            }),
        )
        .await;

    let shops = app.get("/api/listAllShops").await;
    assert_eq!(shops.status, StatusCode::OK);

    let shop = &shops.body[0];
    assert_eq!(shop["id"], id);
    assert_eq!(shop["slug"], "rays-tattoo-co");
    assert_eq!(shop["instagram_handle"], "raystattoo");
    assert_eq!(shop["city_name"], "Portland");
    assert_eq!(shop["state_name"], "Oregon");
    assert_eq!(shop["country_name"], "United States");
    assert_eq!(shop["artists"], json!([]));
}

#[tokio::test]
async fn test_slug_collision_appends_new_id() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;
    let body = json!({ "name": "Ray's Tattoo Co.", "city_id": city_id });

    app.create("/api/addShop", &body).await;
    let second = app.create("/api/addShop", &body).await;

    let shops = app.get("/api/listAllShops").await;
    let slugs: Vec<&str> = shops
        .body
        .as_array()
        .expect("shop list")
        .iter()
        .filter_map(|s| s["slug"].as_str())
        .collect();
    let expected = format!("rays-tattoo-co-{second}");
    assert!(slugs.contains(&"rays-tattoo-co"));
    assert!(slugs.contains(&expected.as_str()));
}

#[tokio::test]
async fn test_name_without_slug_characters_uses_id() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;

    let id = app
        .create("/api/addShop", &json!({ "name": "!!!", "city_id": city_id }))
        .await;

    let shops = app.get("/api/listAllShops").await;
    assert_eq!(shops.body[0]["slug"], format!("shop-{id}"));
}

#[tokio::test]
async fn test_slug_write_failure_still_reports_success() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;
    app.store.fail(StoreOperation::SetShopSlug);

    let response = app
        .post(
            "/api/addShop",
            &json!({ "name": "Black Anchor", "city_id": city_id }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Shop added successfully");

    let shops = app.get("/api/listAllShops").await;
    assert_eq!(shops.body[0]["name"], "Black Anchor");
    assert!(shops.body[0]["slug"].is_null());
}

#[tokio::test]
async fn test_insert_failure_is_server_error() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;
    app.store.fail(StoreOperation::InsertShop);

    let response = app
        .post(
            "/api/addShop",
            &json!({ "name": "Black Anchor", "city_id": city_id }),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error(), "Failed to add shop");
    assert!(response.body["details"].is_string());
}

#[tokio::test]
async fn test_rename_keeps_slug() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;
    let id = app
        .create(
            "/api/addShop",
            &json!({ "name": "Black Anchor", "city_id": city_id }),
        )
        .await;

    let response = app
        .put("/api/updateShop", &json!({ "id": id, "name": "Red Anchor" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let shops = app.get("/api/listAllShops").await;
    assert_eq!(shops.body[0]["name"], "Red Anchor");
    assert_eq!(shops.body[0]["slug"], "black-anchor");
}

#[tokio::test]
async fn test_update_shop_cannot_clear_name() {
    let app = TestApp::new();

    let response = app
        .put("/api/updateShop", &json!({ "id": 1, "name": null }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Field cannot be empty: name");
}

#[tokio::test]
async fn test_duplicate_link_is_rejected() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;
    let shop_id = app
        .create(
            "/api/addShop",
            &json!({ "name": "Black Anchor", "city_id": city_id }),
        )
        .await;
    let artist_id = app
        .create(
            "/api/addArtist",
            &json!({ "name": "Mara", "city_id": city_id }),
        )
        .await;
    let link = json!({ "artist_id": artist_id, "shop_id": shop_id });

    let first = app.post("/api/addArtistShopLink", &link).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["message"], "Artist-shop link added successfully");

    let second = app.post("/api/addArtistShopLink", &link).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error(), "Artist-shop link already exists");

    let shops = app.get("/api/listAllShops").await;
    assert_eq!(
        shops.body[0]["artists"],
        json!([{ "id": artist_id, "name": "Mara" }])
    );
}

#[tokio::test]
async fn test_link_requires_both_ids() {
    let app = TestApp::new();

    let response = app
        .post("/api/addArtistShopLink", &json!({ "artist_id": 3 }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Missing required fields: shop_id");
}
