use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use spotme_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Object storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// A required request field was absent
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// No storage access key configured
    #[error("BUNNY_API_KEY not configured")]
    NotConfigured,

    /// Storage answered with a non-success status
    #[error("Storage upload failed ({status})")]
    Api { status: u16, body: String },

    /// Storage could not be reached or timed out
    #[error("Storage unavailable")]
    Unavailable(String),

    /// Asset payload could not be decoded for upload
    #[error("Invalid asset payload")]
    InvalidPayload(String),
}

impl HttpError for StorageError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::Api { .. } | Self::Unavailable(_) | Self::InvalidPayload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingField(_) => "invalid_request",
            Self::NotConfigured => "config_error",
            Self::Api { .. } => "api_error",
            Self::Unavailable(_) => "unavailable",
            Self::InvalidPayload(_) => "internal_error",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Api { body, .. } if !body.is_empty() => Some(body.clone()),
            Self::Unavailable(reason) | Self::InvalidPayload(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        spotme_core::error_response(&self)
    }
}
