use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each endpoint crate's error type. Every failure leaves the
/// service as the same JSON envelope, see [`ErrorBody`].
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type used in logs (e.g. `invalid_request`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String {
        self.to_string()
    }

    /// Optional diagnostic detail, usually the upstream response text
    fn details(&self) -> Option<String> {
        None
    }

    /// Optional remediation hint for operators
    fn hint(&self) -> Option<String> {
        None
    }
}

/// Error envelope: `{ error, details?, hint? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl<E: HttpError + ?Sized> From<&E> for ErrorBody {
    fn from(error: &E) -> Self {
        Self {
            error: error.client_message(),
            details: error.details(),
            hint: error.hint(),
        }
    }
}

/// Render a domain error as the JSON error envelope, logging server faults
pub fn error_response<E: HttpError + ?Sized>(error: &E) -> Response {
    let status = error.status_code();

    if status.is_server_error() {
        tracing::error!(error_type = error.error_type(), %status, "{error}");
    } else {
        tracing::debug!(error_type = error.error_type(), %status, "{error}");
    }

    (status, Json(ErrorBody::from(error))).into_response()
}
