use std::time::Instant;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, header::CONTENT_TYPE};
use spotme_telemetry::metrics::{Outcome, Provider, record_provider_call};

use crate::protocol::{InlineData, Part};

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Fetch a reference image as an inline part
///
/// Failure is logged and yields `None`; generation then continues text-only.
pub async fn fetch_reference_image(client: &Client, url: &str) -> Option<Part> {
    let start = Instant::now();

    let response = match client.get(url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            record_provider_call(Provider::ReferenceImage, Outcome::Error, start);
            tracing::warn!(status = %response.status(), "could not fetch reference image");
            return None;
        }
        Err(e) => {
            record_provider_call(Provider::ReferenceImage, Outcome::Error, start);
            tracing::warn!(error = %e, "could not fetch reference image");
            return None;
        }
    };

    let mime_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            record_provider_call(Provider::ReferenceImage, Outcome::Error, start);
            tracing::warn!(error = %e, "could not read reference image");
            return None;
        }
    };
    record_provider_call(Provider::ReferenceImage, Outcome::Success, start);

    tracing::info!(size = bytes.len(), mime_type, "reference image added");

    Some(Part::InlineData {
        inline_data: InlineData {
            mime_type,
            data: STANDARD.encode(&bytes),
        },
    })
}
