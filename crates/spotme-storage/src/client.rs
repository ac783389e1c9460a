use std::time::{Duration, Instant};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, header::CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use spotme_config::StorageConfig;
use spotme_core::HttpError;
use spotme_telemetry::metrics::{Outcome, Provider, record_provider_call};
use url::Url;

use crate::{
    asset::{AssetSource, StoredAsset},
    error::{Result, StorageError},
};

/// Bunny edge storage client
///
/// Objects are written with `PUT {endpoint}/{zone}/{key}` and served from
/// `{cdn_scheme}://{cdn_domain}/{key}`.
#[derive(Debug)]
pub struct StorageClient {
    client: Client,
    api_key: Option<SecretString>,
    zone: String,
    cdn_domain: String,
    cdn_scheme: String,
    endpoint: Url,
    timeout: Duration,
    upload_token_ttl: Duration,
}

impl StorageClient {
    /// Create a client from configuration, sharing `client`'s connection pool
    pub fn new(config: &StorageConfig, client: Client) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            zone: config.zone.clone(),
            cdn_domain: config.cdn_domain.clone(),
            cdn_scheme: config.cdn_scheme.clone(),
            endpoint: config.endpoint.clone(),
            timeout: config.timeout()?,
            upload_token_ttl: config.upload_token_ttl()?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    pub(crate) fn upload_token_ttl(&self) -> Duration {
        self.upload_token_ttl
    }

    /// Destination for a direct upload of `key`
    pub fn upload_url(&self, key: &str) -> String {
        format!("{}/{}/{key}", self.endpoint.as_str().trim_end_matches('/'), self.zone)
    }

    /// Public CDN location of `key`
    pub fn public_url(&self, key: &str) -> String {
        format!("{}://{}/{key}", self.cdn_scheme, self.cdn_domain)
    }

    /// Upload `bytes` under `key` and return the public URL
    ///
    /// Any 2xx answer counts as stored.
    pub async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or(StorageError::NotConfigured)?;

        tracing::debug!(key, content_type, size = bytes.len(), "uploading object");

        let start = Instant::now();
        let response = self
            .client
            .put(self.upload_url(key))
            .timeout(self.timeout)
            .header("AccessKey", api_key.expose_secret())
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                record_provider_call(Provider::Storage, Outcome::Error, start);
                return Err(StorageError::Unavailable(e.to_string()));
            }
        };

        let status = response.status();
        record_provider_call(Provider::Storage, Outcome::from_ok(status.is_success()), start);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(self.public_url(key))
    }

    /// Store a base64 asset, falling back to an inline data URI
    ///
    /// Without an access key the asset is returned inline tagged
    /// [`AssetSource::Base64`]; if the upload fails it is returned inline
    /// tagged [`AssetSource::Base64Fallback`]. The data URI declares
    /// `data_uri_mime`, which may differ from the upload `content_type`.
    pub async fn persist_or_inline(
        &self,
        key: &str,
        content_type: &str,
        data_uri_mime: &str,
        base64_payload: &str,
    ) -> StoredAsset {
        let inline = |source| StoredAsset::Inline {
            data_uri: spotme_core::text::data_uri(data_uri_mime, base64_payload),
            source,
        };

        if !self.is_configured() {
            tracing::debug!("storage not configured, returning asset inline");
            return inline(AssetSource::Base64);
        }

        let upload = match STANDARD.decode(base64_payload) {
            Ok(bytes) => self.upload(key, content_type, bytes).await,
            Err(e) => Err(StorageError::InvalidPayload(e.to_string())),
        };

        match upload {
            Ok(url) => {
                tracing::info!(%url, "asset stored");
                StoredAsset::Remote { url }
            }
            Err(e) => {
                tracing::warn!(key, error = %e, details = ?e.details(), "upload failed, returning asset inline");
                inline(AssetSource::Base64Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_bytes, header, method, path},
    };

    use super::*;

    fn test_config(endpoint: &str, api_key: Option<&str>) -> StorageConfig {
        StorageConfig {
            api_key: api_key.map(|k| SecretString::from(k.to_owned())),
            zone: "test-zone".to_string(),
            cdn_domain: "cdn.test".to_string(),
            endpoint: Url::parse(endpoint).unwrap(),
            ..StorageConfig::default()
        }
    }

    fn test_client(endpoint: &str, api_key: Option<&str>) -> StorageClient {
        StorageClient::new(&test_config(endpoint, api_key), Client::new()).unwrap()
    }

    #[test]
    fn urls_are_built_from_zone_and_domain() {
        let client = test_client("https://storage.example.com/", Some("k"));

        assert_eq!(
            client.upload_url("temp/1-abcd-a.png"),
            "https://storage.example.com/test-zone/temp/1-abcd-a.png"
        );
        assert_eq!(client.public_url("audio/x.mp3"), "https://cdn.test/audio/x.mp3");
    }

    #[tokio::test]
    async fn upload_puts_bytes_with_access_key() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/test-zone/generated/a.jpg"))
            .and(header("AccessKey", "storage-key"))
            .and(header("content-type", "image/jpeg"))
            .and(body_bytes(b"jpeg".to_vec()))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("storage-key"));
        let url = client.upload("generated/a.jpg", "image/jpeg", b"jpeg".to_vec()).await.unwrap();

        assert_eq!(url, "https://cdn.test/generated/a.jpg");
    }

    #[tokio::test]
    async fn upload_rejection_is_an_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("wrong"));
        let err = client.upload("a.jpg", "image/jpeg", vec![1]).await.unwrap_err();

        assert!(matches!(err, StorageError::Api { status: 401, ref body } if body == "bad key"));
    }

    #[tokio::test]
    async fn upload_without_key_is_not_configured() {
        let client = test_client("http://127.0.0.1:9", None);
        let err = client.upload("a.jpg", "image/jpeg", vec![1]).await.unwrap_err();

        assert!(matches!(err, StorageError::NotConfigured));
    }

    #[tokio::test]
    async fn unreachable_storage_is_unavailable() {
        let client = test_client("http://127.0.0.1:9", Some("k"));
        let err = client.upload("a.jpg", "image/jpeg", vec![1]).await.unwrap_err();

        assert!(matches!(err, StorageError::Unavailable(_)));
    }

    #[tokio::test]
    async fn persist_without_key_is_inline_base64() {
        let client = test_client("http://127.0.0.1:9", None);
        let asset = client.persist_or_inline("generated/a.jpg", "image/jpeg", "image/jpeg", "AAAA").await;

        assert_eq!(
            asset,
            StoredAsset::Inline {
                data_uri: "data:image/jpeg;base64,AAAA".to_string(),
                source: AssetSource::Base64,
            }
        );
    }

    #[tokio::test]
    async fn persist_failure_falls_back_inline() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("k"));
        let asset = client.persist_or_inline("audio/a.mp3", "audio/mpeg", "audio/mp3", "AAAA").await;

        assert_eq!(asset.source(), AssetSource::Base64Fallback);
        let (url, data, _) = asset.into_parts();
        assert!(url.is_none());
        assert_eq!(data.as_deref(), Some("data:audio/mp3;base64,AAAA"));
    }

    #[tokio::test]
    async fn persist_success_returns_cdn_url() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/test-zone/audio/a.mp3"))
            .and(body_bytes(vec![0u8, 0, 0]))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("k"));
        let asset = client.persist_or_inline("audio/a.mp3", "audio/mpeg", "audio/mp3", "AAAA").await;

        assert_eq!(
            asset,
            StoredAsset::Remote {
                url: "https://cdn.test/audio/a.mp3".to_string()
            }
        );
    }

    #[tokio::test]
    async fn undecodable_payload_falls_back_without_upload() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("k"));
        let asset = client.persist_or_inline("a.jpg", "image/jpeg", "image/jpeg", "not base64!").await;

        assert_eq!(asset.source(), AssetSource::Base64Fallback);
    }
}
