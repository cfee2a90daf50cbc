//! Liveness and readiness checks.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the store is not configured or does
/// not answer a ping.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Ok(store) = state.store() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
