use serde::Serialize;

/// Where a generated asset ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetSource {
    /// Uploaded, served from the CDN
    BunnyCdn,
    /// Inline because storage is not configured
    Base64,
    /// Inline because the upload failed
    Base64Fallback,
}

/// A generated asset: exactly one of a public URL or an inline data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredAsset {
    Remote { url: String },
    Inline { data_uri: String, source: AssetSource },
}

impl StoredAsset {
    pub fn source(&self) -> AssetSource {
        match self {
            Self::Remote { .. } => AssetSource::BunnyCdn,
            Self::Inline { source, .. } => *source,
        }
    }

    /// Split into `(url, data_uri, source)` for response bodies
    pub fn into_parts(self) -> (Option<String>, Option<String>, AssetSource) {
        match self {
            Self::Remote { url } => (Some(url), None, AssetSource::BunnyCdn),
            Self::Inline { data_uri, source } => (None, Some(data_uri), source),
        }
    }
}
