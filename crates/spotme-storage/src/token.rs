//! Upload tokens for direct client-to-storage uploads

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    StorageClient,
    error::{Result, StorageError},
};

#[derive(Debug, Deserialize)]
pub struct UploadTokenRequest {
    #[serde(default, deserialize_with = "spotme_core::fields::lenient_string")]
    pub filename: Option<String>,
}

/// Upload destination handed to a client
///
/// `api_key` is the storage zone's own access key and `expires_at` is
/// advisory: nothing on the storage side enforces it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadToken {
    pub success: bool,
    pub upload_url: String,
    pub cdn_url: String,
    pub api_key: String,
    /// Unix milliseconds
    pub expires_at: i64,
    /// Object key the client must upload to
    pub filename: String,
}

/// Replace every character outside `[A-Za-z0-9.]` with `_`
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}

impl StorageClient {
    /// Mint an upload destination under `temp/` for `filename`
    pub fn issue_upload_token(&self, filename: &str) -> Result<UploadToken> {
        let api_key = self.api_key().ok_or(StorageError::NotConfigured)?;

        let key = spotme_core::keys::object_key("temp", &format!("-{}", sanitize_filename(filename)));
        let ttl_millis = i64::try_from(self.upload_token_ttl().as_millis()).unwrap_or(i64::MAX);
        let expires_at = spotme_core::keys::unix_millis().saturating_add(ttl_millis);

        tracing::warn!(key, "issuing upload token carrying the storage access key");

        Ok(UploadToken {
            success: true,
            upload_url: self.upload_url(&key),
            cdn_url: self.public_url(&key),
            api_key: api_key.expose_secret().to_owned(),
            expires_at,
            filename: key,
        })
    }
}
