#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod annotation;
mod client;
mod error;
mod likelihood;
mod service;
mod verdict;

use std::sync::Arc;

use axum::{Json, Router, extract::State};
use serde::Deserialize;
use spotme_core::{JsonPayload, post_endpoint, text::truncate};

pub use annotation::SafeSearchAnnotation;
pub use client::VisionClient;
pub use error::{ModerationError, Result};
pub use likelihood::Likelihood;
pub use service::ModerationService;
pub use verdict::Verdict;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    #[serde(default, deserialize_with = "spotme_core::fields::lenient_string")]
    pub image_url: Option<String>,
}

/// Build the moderation service from configuration
///
/// Without a Google API key the service is built in skip mode.
pub fn build_service(config: &spotme_config::Config, http: reqwest::Client) -> Arc<ModerationService> {
    let vision = config
        .google
        .api_key
        .clone()
        .map(|key| VisionClient::new(http, key, config.google.vision_url.clone()));

    Arc::new(ModerationService::new(vision))
}

/// Create the endpoint router for moderation checks
pub fn endpoint_router() -> Router<Arc<ModerationService>> {
    Router::new().route("/check-safesearch", post_endpoint(check_safesearch))
}

async fn check_safesearch(
    State(service): State<Arc<ModerationService>>,
    JsonPayload(request): JsonPayload<CheckRequest>,
) -> Result<Json<Verdict>> {
    let image_url = request.image_url.ok_or(ModerationError::MissingField("imageUrl"))?;

    tracing::info!(image_url = truncate(&image_url, 50), "moderation check");

    Ok(Json(service.check(&image_url).await))
}
