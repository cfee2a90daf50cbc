//! Integration tests for Inkmap.
//!
//! Requests go through the full router (routing, CORS, extractors, error
//! rendering) with `tower::ServiceExt::oneshot`; no socket is opened. The
//! store is a [`MemoryStore`] so tests can count writes and inject failures.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p inkmap-integration-tests
//!
//! # PostgreSQL tests (need a migrated database)
//! INKMAP_DATABASE_URL=postgres://... INKMAP_SERVICE_KEY=... \
//!     cargo test -p inkmap-integration-tests -- --ignored
//! ```

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use inkmap_api::db::MemoryStore;
use inkmap_api::{AppState, build_app};

/// Router plus the store behind it.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

/// A buffered response. `body` is `Value::Null` when the body is empty.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `id` of a write response.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.body["id"]
            .as_i64()
            .unwrap_or_else(|| panic!("response has no id: {}", self.body))
    }

    /// The `error` of an error response.
    #[must_use]
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// App backed by an empty [`MemoryStore`].
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = build_app(AppState::new(store.clone()));
        Self { store, router }
    }

    /// App without database settings. `store` is present but never reached.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            router: build_app(AppState::unconfigured()),
        }
    }

    /// Send a request with an optional JSON body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> TestResponse {
        match body {
            Some(json) => {
                let bytes = serde_json::to_vec(json).expect("serialize body");
                self.send_raw(method, uri, Some("application/json"), bytes)
                    .await
            }
            None => self.send_raw(method, uri, None, Vec::new()).await,
        }
    }

    /// Send a request with an arbitrary body and content type.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(body.into()).expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    /// Create a post and return the new id, failing the test otherwise.
    pub async fn create(&self, uri: &str, body: &Value) -> i64 {
        let response = self.post(uri, body).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "POST {uri} failed: {}",
            response.body
        );
        response.id()
    }

    /// Seed `country > state > city` and return the city id.
    pub async fn seed_city(&self, city: &str) -> i64 {
        let country_id = self
            .create(
                "/api/addCountry",
                &serde_json::json!({ "name": "United States", "country_code": "US" }),
            )
            .await;
        let state_id = self
            .create(
                "/api/addState",
                &serde_json::json!({ "name": "Oregon", "country_id": country_id }),
            )
            .await;
        self.create(
            "/api/addCity",
            &serde_json::json!({ "name": city, "state_id": state_id }),
        )
        .await
    }
}
