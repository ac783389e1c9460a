use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Object storage (Bunny edge storage) configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage zone access key, sent as the `AccessKey` header
    #[serde(default, deserialize_with = "crate::secret::optional_secret")]
    pub api_key: Option<SecretString>,
    /// Storage zone name
    #[serde(default = "default_zone")]
    pub zone: String,
    /// Pull zone hostname that serves uploaded objects
    #[serde(default = "default_cdn_domain")]
    pub cdn_domain: String,
    /// Storage API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    /// Scheme used when building public CDN URLs
    #[serde(default = "default_cdn_scheme")]
    pub cdn_scheme: String,
    /// Upper bound for a single upload (e.g. "60s")
    #[serde(default = "crate::google::default_timeout")]
    pub timeout: String,
    /// Advisory lifetime reported with upload tokens (e.g. "5m")
    #[serde(default = "default_upload_token_ttl")]
    pub upload_token_ttl: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            zone: default_zone(),
            cdn_domain: default_cdn_domain(),
            endpoint: default_endpoint(),
            cdn_scheme: default_cdn_scheme(),
            timeout: crate::google::default_timeout(),
            upload_token_ttl: default_upload_token_ttl(),
        }
    }
}

fn default_zone() -> String {
    "spotme".to_string()
}

fn default_cdn_domain() -> String {
    "spotme.b-cdn.net".to_string()
}

fn default_endpoint() -> Url {
    Url::parse("https://storage.bunnycdn.com").expect("valid default URL")
}

fn default_cdn_scheme() -> String {
    "https".to_string()
}

fn default_upload_token_ttl() -> String {
    "5m".to_string()
}
