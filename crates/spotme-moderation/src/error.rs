use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use spotme_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModerationError>;

/// Moderation errors
///
/// Only [`ModerationError::MissingField`] ever reaches a client; provider
/// failures are folded into a passing verdict.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// Vision answered with a non-success status
    #[error("Vision API error")]
    Api { status: u16, body: String },

    /// Vision could not be reached or timed out
    #[error("Vision API unavailable: {0}")]
    Unavailable(String),

    /// Vision answered with a body that could not be decoded
    #[error("Invalid Vision API response: {0}")]
    InvalidResponse(String),
}

impl HttpError for ModerationError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::Api { .. } | Self::Unavailable(_) | Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingField(_) => "invalid_request",
            Self::Api { .. } | Self::InvalidResponse(_) => "api_error",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

impl IntoResponse for ModerationError {
    fn into_response(self) -> Response {
        spotme_core::error_response(&self)
    }
}
