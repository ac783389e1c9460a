use std::time::Instant;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use spotme_telemetry::metrics::{Outcome, Provider, record_provider_call};
use url::Url;

use crate::{
    error::{ImageGenError, Result},
    protocol::{Blob, GenerateContentRequest, GenerateContentResponse},
};

/// Gemini `generateContent` client
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    api_key: SecretString,
    base_url: Url,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: SecretString, base_url: Url) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/v1beta/models/{model}:generateContent")
    }

    /// Run one generation and return the first inline image
    ///
    /// A non-success status is reported as
    /// [`ImageGenError::GenerationFailed`] carrying the provider body.
    pub async fn generate_image(&self, model: &str, request: &GenerateContentRequest) -> Result<Blob> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.generate_url(model))
            .query(&[("key", self.api_key.expose_secret())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                record_provider_call(Provider::Gemini, Outcome::Error, start);
                tracing::error!(model, error = %e, "gemini request failed");
                ImageGenError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            record_provider_call(Provider::Gemini, Outcome::Error, start);
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                model,
                %status,
                body = spotme_core::text::truncate(&body, 500),
                "gemini returned error"
            );
            return Err(ImageGenError::GenerationFailed {
                status: status.as_u16(),
                body,
            });
        }

        let wire: GenerateContentResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            record_provider_call(Provider::Gemini, Outcome::Error, start);
            ImageGenError::InvalidResponse(e.to_string())
        })?;
        record_provider_call(Provider::Gemini, Outcome::Success, start);

        wire.into_first_image().ok_or_else(|| {
            tracing::warn!(model, "gemini response carried no image");
            ImageGenError::NoImage
        })
    }
}
