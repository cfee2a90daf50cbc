//! CORS policy.

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// CORS layer for an endpoint accepting `method`.
///
/// Any origin is allowed. Every `OPTIONS` request is answered here with an
/// empty `200` before the handler runs.
#[must_use]
pub fn cors_layer(method: Method) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([method, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
