//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. Panic catcher (panics become `500` JSON)
//! 3. `TraceLayer` (one `http_request` span per request)
//! 4. Request ID (recorded on the span, echoed in the response)
//! 5. Per-endpoint CORS (answers `OPTIONS`)

pub mod cors;
pub mod panic;
pub mod request_id;

pub use cors::cors_layer;
pub use panic::panic_response;
pub use request_id::request_id_middleware;
