#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
pub mod fields;
pub mod gate;
mod http_client;
pub mod keys;
pub mod text;

pub use error::{ErrorBody, HttpError, error_response};
pub use gate::{GateError, JsonPayload, post_endpoint};
pub use http_client::http_client;
