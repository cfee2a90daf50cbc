//! Method gating, CORS, configuration and body errors.

use axum::http::{Method, StatusCode, header};
use serde_json::json;

use inkmap_api::db::memory::StoreOperation;
use inkmap_integration_tests::TestApp;

#[tokio::test]
async fn test_options_preflight_is_empty_ok() {
    let app = TestApp::new();

    for uri in ["/api/addShop", "/api/updateSubmission", "/api/listAllShops"] {
        let response = app.send(Method::OPTIONS, uri, None).await;

        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert!(response.body.is_null(), "{uri}");
        assert_eq!(
            response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*",
            "{uri}"
        );
    }
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_preflight_advertises_endpoint_method() {
    let app = TestApp::new();

    let response = app.send(Method::OPTIONS, "/api/updateCity", None).await;

    let allowed = response.headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .expect("ascii header");
    assert!(allowed.contains("PUT"));
    assert!(allowed.contains("OPTIONS"));
    assert!(!allowed.contains("POST"));
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let app = TestApp::new();

    let response = app.get("/api/addCountry").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, json!({ "error": "Method not allowed" }));

    let response = app.post("/api/listCountries", &json!({})).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let app = TestApp::new();

    let response = app.get("/api/listEverything").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_missing_configuration_fails_before_validation() {
    let app = TestApp::unconfigured();

    // Invalid on purpose: configuration is checked first
    let response = app.post("/api/addCountry", &json!({})).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error(), "Server configuration error");
    assert!(response.body["details"].is_string());

    let response = app.get("/api/listAllShops").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_missing_configuration_still_gates_methods() {
    let app = TestApp::unconfigured();

    let response = app.get("/api/addCountry").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let response = app.send(Method::OPTIONS, "/api/addCountry", None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .send_raw(
            Method::POST,
            "/api/addCountry",
            Some("application/json"),
            "{ not json",
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid request body");

    let response = app
        .send_raw(Method::POST, "/api/addCountry", Some("text/plain"), "name=x")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid request body");
}

#[tokio::test]
async fn test_wrongly_typed_field_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .post("/api/addCity", &json!({ "name": "Salem", "state_id": "seven" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid request body");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_list_failure_forwards_details() {
    let app = TestApp::new();
    app.store.fail(StoreOperation::ListCities);

    let response = app.get("/api/listCities").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error(), "Failed to fetch cities");
    assert_eq!(
        response.body["details"],
        "store unavailable: injected failure in ListCities"
    );
}

#[tokio::test]
async fn test_health_checks() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("ok"));

    let response = app.get("/health/ready").await;
    assert_eq!(response.status, StatusCode::OK);

    let app = TestApp::unconfigured();
    let response = app.get("/health/ready").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert!(response.headers.contains_key("x-request-id"));
}
