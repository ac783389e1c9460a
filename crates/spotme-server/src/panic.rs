use std::any::Any;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use spotme_core::ErrorBody;

/// Render a handler panic as the 500 error envelope
///
/// The panic message is logged but kept out of the body.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = message, "handler panicked");

    let body = ErrorBody {
        error: "Internal server error".to_string(),
        details: None,
        hint: None,
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
