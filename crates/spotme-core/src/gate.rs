//! Request gate shared by every endpoint
//!
//! Preflight handling, method filtering and JSON body parsing. Handlers only
//! ever see a parsed object payload; everything else is rejected here with the
//! common error envelope.

use axum::{
    extract::{FromRequest, Request},
    handler::Handler,
    response::{IntoResponse, Response},
    routing::{MethodRouter, post},
};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::{HttpError, error_response};

/// Maximum accepted request body size
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Rejections produced before a handler runs
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Invalid JSON body")]
    InvalidJson(String),

    #[error("Request body too large")]
    BodyTooLarge { limit: usize },

    #[error("Failed to read request body")]
    BodyRead(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,
}

impl HttpError for GateError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) | Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidJson(_) | Self::BodyRead(_) => "invalid_request",
            Self::BodyTooLarge { .. } => "payload_too_large",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::NotFound => "not_found",
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::InvalidJson(reason) | Self::BodyRead(reason) => Some(reason.clone()),
            Self::BodyTooLarge { limit } => Some(format!("body exceeds {limit} bytes")),
            Self::MethodNotAllowed | Self::NotFound => None,
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        error_response(&self)
    }
}

/// JSON object body extractor
///
/// An empty body reads as `{}`. Anything that is not a JSON object is rejected
/// with 400, bodies over [`BODY_LIMIT_BYTES`] with 413. The `Content-Type`
/// header is not inspected.
#[derive(Debug)]
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = GateError;

    async fn from_request(request: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES)
            .await
            .map_err(|err| {
                let is_length_limit = std::error::Error::source(&err)
                    .is_some_and(|source| source.is::<http_body_util::LengthLimitError>());

                if is_length_limit {
                    GateError::BodyTooLarge { limit: BODY_LIMIT_BYTES }
                } else {
                    GateError::BodyRead(err.to_string())
                }
            })?;

        parse_body(&bytes).map(Self)
    }
}

/// Parse raw body bytes into a typed payload
///
/// The body must decode to a JSON object before `T` is applied, so a bare
/// array or string never reaches a handler as an empty request.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, GateError> {
    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice::<Value>(bytes).map_err(|err| GateError::InvalidJson(err.to_string()))?
    };

    if !value.is_object() {
        return Err(GateError::InvalidJson("expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|err| GateError::InvalidJson(err.to_string()))
}

/// CORS preflight: 200 with an empty body, headers come from the envelope layer
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> GateError {
    GateError::MethodNotAllowed
}

pub async fn not_found() -> GateError {
    GateError::NotFound
}

/// Route a POST handler with preflight support and a JSON 405 for other methods
pub fn post_endpoint<H, T, S>(handler: H) -> MethodRouter<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    post(handler).options(preflight).fallback(method_not_allowed)
}
