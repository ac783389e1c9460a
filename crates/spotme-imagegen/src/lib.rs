#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod client;
mod error;
mod prompt;
mod protocol;
mod reference;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use spotme_core::{HttpError, JsonPayload, post_endpoint};
use spotme_storage::StorageClient;
use tracing::Instrument;

pub use error::{ImageGenError, Result};
pub use prompt::Scene;
pub use server::{DeferredJob, Server};
pub use types::{DeferredAccepted, DeferredImageRequest, DeferredImageResponse, GenerateImageRequest, GenerateImageResponse};

use server::ImageGenServerBuilder;

/// Build the image generation server from configuration
pub fn build_server(config: &spotme_config::Config, http: reqwest::Client, storage: Arc<StorageClient>) -> Arc<Server> {
    Arc::new(ImageGenServerBuilder::new(config, http, storage).build())
}

/// Create the endpoint router for image generation
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/generate-image", post_endpoint(generate))
        .route("/generate-image-background", post_endpoint(generate_background))
}

/// Handle synchronous image generation
async fn generate(
    State(server): State<Arc<Server>>,
    JsonPayload(request): JsonPayload<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>> {
    let response = server.generate(request).await?;

    tracing::info!(source = ?response.source, "image generated");

    Ok(Json(response))
}

/// Handle deferred image generation
///
/// With `Prefer: respond-async` the job is detached after validation and the
/// handler answers 202 with the location the image will appear at.
async fn generate_background(
    State(server): State<Arc<Server>>,
    headers: HeaderMap,
    JsonPayload(request): JsonPayload<DeferredImageRequest>,
) -> Result<Response> {
    let job = server.prepare_deferred(request)?;

    if !prefers_async(&headers) {
        return Ok(Json(server.run_deferred(&job).await?).into_response());
    }

    let accepted = DeferredAccepted {
        accepted: true,
        job_id: job.job_id.clone(),
        image_url: server.job_url(&job),
    };

    let span = tracing::info_span!("deferred_job", job_id = %job.job_id);
    tokio::spawn(
        async move {
            match server.run_deferred(&job).await {
                Ok(response) => tracing::info!(image_url = %response.image_url, "deferred job finished"),
                Err(e) => tracing::error!(error = %e, details = ?e.details(), "deferred job failed"),
            }
        }
        .instrument(span),
    );

    Ok((StatusCode::ACCEPTED, Json(accepted)).into_response())
}

/// `Prefer: respond-async` (RFC 7240)
fn prefers_async(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::HeaderName::from_static("prefer"))
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|preference| preference.split(';').next())
        .any(|token| token.trim().eq_ignore_ascii_case("respond-async"))
}
