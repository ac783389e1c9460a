use std::sync::Arc;

use spotme_config::TtsConfig;
use spotme_core::{keys::object_key, text::truncate};
use spotme_storage::StorageClient;

use crate::{
    error::{Result, TtsError},
    provider::{SpeechProvider, google::GoogleTtsProvider},
    types::{SpeechRequest, SpeechResponse, Synthesis},
};

/// Storage naming for an audio encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AudioFormat {
    extension: &'static str,
    content_type: &'static str,
    data_uri_mime: &'static str,
}

fn audio_format(encoding: &str) -> AudioFormat {
    match encoding {
        "OGG_OPUS" => AudioFormat {
            extension: ".ogg",
            content_type: "audio/ogg",
            data_uri_mime: "audio/ogg",
        },
        "LINEAR16" | "MULAW" | "ALAW" => AudioFormat {
            extension: ".wav",
            content_type: "audio/wav",
            data_uri_mime: "audio/wav",
        },
        _ => AudioFormat {
            extension: ".mp3",
            content_type: "audio/mpeg",
            data_uri_mime: "audio/mp3",
        },
    }
}

/// Speech synthesis server
#[derive(Debug)]
pub struct Server {
    provider: Option<Box<dyn SpeechProvider>>,
    storage: Arc<StorageClient>,
    config: TtsConfig,
}

impl Server {
    pub fn new(provider: Option<Box<dyn SpeechProvider>>, storage: Arc<StorageClient>, config: TtsConfig) -> Self {
        Self {
            provider,
            storage,
            config,
        }
    }

    /// Synthesize speech and store it, falling back to inline audio
    pub async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse> {
        let text = request.text.ok_or(TtsError::MissingField("text"))?;
        let provider = self.provider.as_ref().ok_or(TtsError::NotConfigured)?;

        let synthesis = Synthesis {
            text: &text,
            voice: request.voice.as_deref().unwrap_or(&self.config.voice),
            language_code: &self.config.language_code,
            gender: &self.config.gender,
            audio_encoding: &self.config.audio_encoding,
            speaking_rate: self.config.speaking_rate,
            pitch: self.config.pitch,
        };

        tracing::info!(
            provider = provider.name(),
            voice = synthesis.voice,
            text = truncate(&text, 50),
            "synthesizing speech"
        );

        let audio = provider.synthesize(&synthesis).await?;

        let format = audio_format(&self.config.audio_encoding);
        let key = object_key("audio", format.extension);
        let asset = self
            .storage
            .persist_or_inline(&key, format.content_type, format.data_uri_mime, &audio)
            .await;

        Ok(asset.into())
    }
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a spotme_config::Config,
    http: reqwest::Client,
    storage: Arc<StorageClient>,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a spotme_config::Config, http: reqwest::Client, storage: Arc<StorageClient>) -> Self {
        Self { config, http, storage }
    }

    pub fn build(self) -> Server {
        let provider = self.config.google.api_key.clone().map(|key| {
            Box::new(GoogleTtsProvider::new(self.http, key, self.config.google.tts_url.clone())) as Box<dyn SpeechProvider>
        });

        if provider.is_none() {
            tracing::debug!("speech synthesis disabled until google.api_key is set");
        }

        Server::new(provider, self.storage, self.config.tts.clone())
    }
}
