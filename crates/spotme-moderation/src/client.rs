use std::time::Instant;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use spotme_telemetry::metrics::{Outcome, Provider, record_provider_call};
use url::Url;

use crate::{
    annotation::{AnnotateRequest, AnnotateResponse, SafeSearchAnnotation},
    error::{ModerationError, Result},
};

/// Google Cloud Vision client limited to SafeSearch detection
#[derive(Debug)]
pub struct VisionClient {
    client: Client,
    api_key: SecretString,
    base_url: Url,
}

impl VisionClient {
    pub fn new(client: Client, api_key: SecretString, base_url: Url) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn annotate_url(&self) -> String {
        format!("{}/v1/images:annotate", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Request the SafeSearch annotation for a remote image
    ///
    /// `Ok(None)` means Vision answered but attached no annotation.
    pub async fn safe_search(&self, image_url: &str) -> Result<Option<SafeSearchAnnotation>> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.annotate_url())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&AnnotateRequest::safe_search(image_url))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                record_provider_call(Provider::Vision, Outcome::Error, start);
                tracing::error!(error = %e, "vision request failed");
                ModerationError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            record_provider_call(Provider::Vision, Outcome::Error, start);
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = spotme_core::text::truncate(&body, 200), "vision returned error");
            return Err(ModerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let wire: AnnotateResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            record_provider_call(Provider::Vision, Outcome::Error, start);
            ModerationError::InvalidResponse(e.to_string())
        })?;
        record_provider_call(Provider::Vision, Outcome::Success, start);

        let Some(first) = wire.responses.into_iter().next() else {
            return Ok(None);
        };

        if let Some(error) = &first.error {
            tracing::warn!(%error, "vision reported a per-image error");
        }

        Ok(first.safe_search_annotation)
    }
}
