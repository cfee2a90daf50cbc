//! Countries, states and cities.

use axum::http::StatusCode;
use serde_json::json;

use inkmap_integration_tests::TestApp;

#[tokio::test]
async fn test_add_country_requires_name() {
    let app = TestApp::new();

    let response = app
        .post("/api/addCountry", &json!({ "country_code": "US" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Missing required fields: name");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_country_code_defaults_to_empty_string() {
    let app = TestApp::new();

    let response = app.post("/api/addCountry", &json!({ "name": "Canada" })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Country added successfully");

    let countries = app.get("/api/listCountries").await;
    assert_eq!(countries.status, StatusCode::OK);
    assert_eq!(countries.body[0]["name"], "Canada");
    assert_eq!(countries.body[0]["country_code"], "");
}

#[tokio::test]
async fn test_list_cities_is_flattened() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;

    let cities = app.get("/api/listCities").await;
    assert_eq!(cities.status, StatusCode::OK);

    let city = &cities.body[0];
    assert_eq!(city["id"], city_id);
    assert_eq!(city["name"], "Portland");
    assert_eq!(city["state_name"], "Oregon");
    assert_eq!(city["country_name"], "United States");
    assert_eq!(city["country_code"], "US");
    assert!(city.get("state").is_none());
}

#[tokio::test]
async fn test_list_states_is_flattened() {
    let app = TestApp::new();
    app.seed_city("Portland").await;

    let states = app.get("/api/listStates").await;
    assert_eq!(states.status, StatusCode::OK);
    assert_eq!(states.body[0]["name"], "Oregon");
    assert_eq!(states.body[0]["country_name"], "United States");
    assert_eq!(states.body[0]["country_code"], "US");
}

#[tokio::test]
async fn test_update_city_requires_id() {
    let app = TestApp::new();

    let response = app.put("/api/updateCity", &json!({ "name": "Salem" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Missing required field: id");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_update_city_renames() {
    let app = TestApp::new();
    let city_id = app.seed_city("Portland").await;

    let response = app
        .put("/api/updateCity", &json!({ "id": city_id, "name": "Eugene" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "City updated successfully");

    let cities = app.get("/api/listCities").await;
    assert_eq!(cities.body[0]["name"], "Eugene");
    assert_eq!(cities.body[0]["state_name"], "Oregon");
}

#[tokio::test]
async fn test_update_country_clears_code_to_empty_string() {
    let app = TestApp::new();
    let id = app
        .create(
            "/api/addCountry",
            &json!({ "name": "Mexico", "country_code": "MX" }),
        )
        .await;

    let response = app
        .put("/api/updateCountry", &json!({ "id": id, "country_code": null }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let countries = app.get("/api/listCountries").await;
    assert_eq!(countries.body[0]["country_code"], "");
}

#[tokio::test]
async fn test_update_with_only_id_is_rejected() {
    let app = TestApp::new();

    let response = app.put("/api/updateCountry", &json!({ "id": 4 })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "No fields to update");
}

#[tokio::test]
async fn test_update_of_unknown_row_still_succeeds() {
    let app = TestApp::new();

    let response = app
        .put("/api/updateCity", &json!({ "id": 999, "name": "Nowhere" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.id(), 999);
}
