//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use spotme_config::{Config, CorsConfig, ServerConfig};
use url::Url;

use super::{mock_google::MockGoogle, mock_storage::MockStorage};

pub const GOOGLE_KEY: &str = "test-google-key";
pub const STORAGE_KEY: &str = "test-storage-key";
pub const CDN_DOMAIN: &str = "cdn.test";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with no credentials
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point every Google API at the mock and set a key
    pub fn with_google(mut self, mock: &MockGoogle) -> Self {
        let base_url: Url = mock.base_url().parse().expect("valid URL");

        self.config.google.api_key = Some(SecretString::from(GOOGLE_KEY.to_owned()));
        self.config.google.vision_url = base_url.clone();
        self.config.google.generative_url = base_url.clone();
        self.config.google.tts_url = base_url;
        self
    }

    /// Set a Google key but point every Google API at a closed port
    pub fn with_unreachable_google(mut self) -> Self {
        let base_url: Url = "http://127.0.0.1:9".parse().expect("valid URL");

        self.config.google.api_key = Some(SecretString::from(GOOGLE_KEY.to_owned()));
        self.config.google.vision_url = base_url.clone();
        self.config.google.generative_url = base_url.clone();
        self.config.google.tts_url = base_url;
        self
    }

    /// Point object storage at the mock and set an access key
    pub fn with_storage(mut self, mock: &MockStorage) -> Self {
        self.config.storage.api_key = Some(SecretString::from(STORAGE_KEY.to_owned()));
        self.config.storage.endpoint = mock.base_url().parse().expect("valid URL");
        self.config.storage.cdn_domain = CDN_DOMAIN.to_owned();
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Mount endpoints under a different prefix
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.config.server.base_path = base_path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Set the speech encoding
    pub fn with_audio_encoding(mut self, encoding: &str) -> Self {
        self.config.tts.audio_encoding = encoding.to_owned();
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
