//! Conversion of handler panics into JSON errors.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Response for a panic caught by `CatchPanicLayer`.
///
/// Renders as `500 {"error": "Internal server error", "details": <panic message>}`.
#[allow(clippy::needless_pass_by_value)] // signature required by CatchPanicLayer
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    AppError::Unexpected(details).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_panic_message_is_forwarded() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(String::from("kaboom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
