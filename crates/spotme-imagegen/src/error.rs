use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use spotme_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Image generation errors
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// A required request field was absent
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// One or more deferred job fields were absent
    #[error("Missing parameters")]
    MissingParameters,

    /// No Google API key configured
    #[error("GOOGLE_AI_API_KEY not configured")]
    NotConfigured,

    /// Deferred jobs need both the Google and the storage key
    #[error("API keys not configured")]
    KeysNotConfigured,

    /// Gemini answered with a non-success status (synchronous path)
    #[error("Google AI generation failed")]
    GenerationFailed { status: u16, body: String },

    /// Gemini answered with a non-success status (deferred path)
    #[error("Gemini API error")]
    GeminiApi { status: u16, body: String },

    /// Gemini answered without an inline image
    #[error("No image generated")]
    NoImage,

    /// Gemini could not be reached or timed out
    #[error("Provider unavailable")]
    Unavailable(String),

    /// Gemini answered with a body that could not be decoded
    #[error("Invalid provider response")]
    InvalidResponse(String),

    /// The generated image could not be stored at the requested location
    #[error("Upload failed")]
    UploadFailed(String),
}

impl HttpError for ImageGenError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::MissingParameters => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingField(_) | Self::MissingParameters => "invalid_request",
            Self::NotConfigured | Self::KeysNotConfigured => "config_error",
            Self::GenerationFailed { .. } | Self::GeminiApi { .. } | Self::NoImage | Self::InvalidResponse(_) => {
                "api_error"
            }
            Self::Unavailable(_) => "unavailable",
            Self::UploadFailed(_) => "storage_error",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::GenerationFailed { body, .. } => Some(body.clone()),
            Self::Unavailable(reason) | Self::InvalidResponse(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    fn hint(&self) -> Option<String> {
        match self {
            Self::NotConfigured => Some("Set google.api_key (GOOGLE_AI_API_KEY) in the service configuration".to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for ImageGenError {
    fn into_response(self) -> Response {
        spotme_core::error_response(&self)
    }
}
