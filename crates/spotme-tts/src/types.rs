use serde::{Deserialize, Serialize};
use spotme_core::fields::lenient_string;
use spotme_storage::{AssetSource, StoredAsset};

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    /// Voice name, e.g. `en-US-Neural2-J`
    #[serde(default, deserialize_with = "lenient_string")]
    pub voice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,
    pub source: AssetSource,
}

impl From<StoredAsset> for SpeechResponse {
    fn from(asset: StoredAsset) -> Self {
        let (audio_url, audio_data, source) = asset.into_parts();
        Self {
            success: true,
            audio_url,
            audio_data,
            source,
        }
    }
}

/// Resolved synthesis parameters handed to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis<'a> {
    pub text: &'a str,
    pub voice: &'a str,
    pub language_code: &'a str,
    pub gender: &'a str,
    pub audio_encoding: &'a str,
    pub speaking_rate: f64,
    pub pitch: f64,
}
