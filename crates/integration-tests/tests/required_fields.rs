//! Required-field checks shared by every write endpoint.
//!
//! Each case runs against a fresh store so the write count must stay at zero.

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use inkmap_integration_tests::TestApp;

#[tokio::test]
async fn test_create_without_required_fields_writes_nothing() {
    let cases: [(&str, Value, &str); 8] = [
        ("/api/addCountry", json!({ "country_code": "US" }), "name"),
        ("/api/addState", json!({ "country_id": 1 }), "name"),
        ("/api/addCity", json!({ "name": "   ", "state_id": 1 }), "name"),
        ("/api/addShop", json!({ "phone": "555" }), "name, city_id"),
        ("/api/addArtist", json!({ "name": "Mara", "city_id": 0 }), "city_id"),
        ("/api/addArtistShopLink", json!({}), "artist_id, shop_id"),
        (
            "/api/addSubmission",
            json!({ "message": "Great shop" }),
            "submission_type",
        ),
        (
            "/api/addSubmission",
            json!({ "submission_type": null, "artist_name": "Mara" }),
            "submission_type",
        ),
    ];

    for (uri, body, missing) in cases {
        let app = TestApp::new();

        let response = app.post(uri, &body).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(
            response.error(),
            format!("Missing required fields: {missing}"),
            "{uri} {body}"
        );
        assert_eq!(app.store.write_count(), 0, "{uri} {body}");
    }
}

#[tokio::test]
async fn test_update_without_id_writes_nothing() {
    let cases = [
        (Method::PUT, "/api/updateArtist", json!({ "name": "Mara" })),
        (Method::PUT, "/api/updateCity", json!({ "name": "Salem" })),
        (Method::PUT, "/api/updateCountry", json!({ "name": "Canada" })),
        (Method::PUT, "/api/updateShop", json!({ "name": "Red Anchor" })),
        (Method::PUT, "/api/updateShop", json!({ "id": 0, "phone": "555" })),
        (
            Method::PATCH,
            "/api/updateSubmission",
            json!({ "status": "closed" }),
        ),
        (
            Method::PATCH,
            "/api/updateSubmission",
            json!({ "id": null, "status": "resolved" }),
        ),
    ];

    for (method, uri, body) in cases {
        let app = TestApp::new();

        let response = app.send(method, uri, Some(&body)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(response.error(), "Missing required field: id", "{uri} {body}");
        assert_eq!(app.store.write_count(), 0, "{uri} {body}");
    }
}

#[tokio::test]
async fn test_update_without_id_leaves_existing_rows_untouched() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;
    app.create(
        "/api/addShop",
        &json!({ "name": "Black Anchor", "city_id": city_id }),
    )
    .await;
    let writes = app.store.write_count();

    let response = app
        .put("/api/updateShop", &json!({ "name": "Red Anchor" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.write_count(), writes);
    let shops = app.get("/api/listAllShops").await;
    assert_eq!(shops.body[0]["name"], "Black Anchor");
}
