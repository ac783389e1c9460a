use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use spotme_telemetry::metrics::{Outcome, Provider, record_provider_call};
use url::Url;

use super::SpeechProvider;
use crate::{
    error::{Result, TtsError},
    types::Synthesis,
};

/// Google Cloud Text-to-Speech provider
#[derive(Debug)]
pub struct GoogleTtsProvider {
    client: Client,
    api_key: SecretString,
    base_url: Url,
}

impl GoogleTtsProvider {
    pub fn new(client: Client, api_key: SecretString, base_url: Url) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: Input<'a>,
    voice: Voice<'a>,
    audio_config: AudioConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Input<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Voice<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
    speaking_rate: f64,
    pitch: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: Option<String>,
}

impl<'a> From<&'a Synthesis<'a>> for SynthesizeRequest<'a> {
    fn from(synthesis: &'a Synthesis<'a>) -> Self {
        Self {
            input: Input { text: synthesis.text },
            voice: Voice {
                language_code: synthesis.language_code,
                name: synthesis.voice,
                ssml_gender: synthesis.gender,
            },
            audio_config: AudioConfig {
                audio_encoding: synthesis.audio_encoding,
                speaking_rate: synthesis.speaking_rate,
                pitch: synthesis.pitch,
            },
        }
    }
}

#[async_trait]
impl SpeechProvider for GoogleTtsProvider {
    async fn synthesize(&self, synthesis: &Synthesis<'_>) -> Result<String> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.synthesize_url())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&SynthesizeRequest::from(synthesis))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                record_provider_call(Provider::Tts, Outcome::Error, start);
                tracing::error!(error = %e, "tts request failed");
                TtsError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            record_provider_call(Provider::Tts, Outcome::Error, start);
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = spotme_core::text::truncate(&body, 500), "tts returned error");
            return Err(TtsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let wire: SynthesizeResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            record_provider_call(Provider::Tts, Outcome::Error, start);
            TtsError::InvalidResponse(e.to_string())
        })?;
        record_provider_call(Provider::Tts, Outcome::Success, start);

        wire.audio_content.filter(|audio| !audio.is_empty()).ok_or(TtsError::NoAudio)
    }

    fn name(&self) -> &str {
        "google"
    }
}
