#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod asset;
mod client;
mod error;
mod token;

use std::sync::Arc;

use axum::{Json, Router, extract::State};
use spotme_core::{JsonPayload, post_endpoint, text::truncate};

pub use asset::{AssetSource, StoredAsset};
pub use client::StorageClient;
pub use error::{Result, StorageError};
pub use token::{UploadToken, UploadTokenRequest, sanitize_filename};

/// Build the storage client from configuration
///
/// # Errors
///
/// Returns an error if a configured duration is invalid
pub fn build_client(config: &spotme_config::Config, http: reqwest::Client) -> anyhow::Result<Arc<StorageClient>> {
    let client = StorageClient::new(&config.storage, http)
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage client: {e}"))?;
    Ok(Arc::new(client))
}

/// Create the endpoint router for upload token issuance
pub fn endpoint_router() -> Router<Arc<StorageClient>> {
    Router::new().route("/create-upload-token", post_endpoint(create_upload_token))
}

/// Handle upload token requests
async fn create_upload_token(
    State(storage): State<Arc<StorageClient>>,
    JsonPayload(request): JsonPayload<UploadTokenRequest>,
) -> Result<Json<UploadToken>> {
    let filename = request.filename.ok_or(StorageError::MissingField("filename"))?;

    tracing::info!(filename = truncate(&filename, 50), "upload token requested");

    Ok(Json(storage.issue_upload_token(&filename)?))
}
