use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use spotme_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("GOOGLE_AI_API_KEY not configured")]
    NotConfigured,

    /// Provider answered with a non-success status
    #[error("TTS generation failed")]
    Api { status: u16, body: String },

    /// Provider answered without audio content
    #[error("No audio generated")]
    NoAudio,

    /// Provider could not be reached or timed out
    #[error("Provider unavailable")]
    Unavailable(String),

    /// Provider answered with a body that could not be decoded
    #[error("Invalid provider response")]
    InvalidResponse(String),
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingField(_) => "invalid_request",
            Self::NotConfigured => "config_error",
            Self::Api { .. } | Self::NoAudio | Self::InvalidResponse(_) => "api_error",
            Self::Unavailable(_) => "unavailable",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Api { body, .. } => Some(body.clone()),
            Self::Unavailable(reason) | Self::InvalidResponse(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        spotme_core::error_response(&self)
    }
}
