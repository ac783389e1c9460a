use serde::{Deserialize, Serialize};
use spotme_core::fields::lenient_string;
use spotme_storage::{AssetSource, StoredAsset};

/// Synchronous generation request
#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub prompt: Option<String>,
    /// Extra style words appended after the configured suffix
    #[serde(default, deserialize_with = "lenient_string")]
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    pub source: AssetSource,
}

impl From<StoredAsset> for GenerateImageResponse {
    fn from(asset: StoredAsset) -> Self {
        let (image_url, image_data, source) = asset.into_parts();
        Self {
            success: true,
            image_url,
            image_data,
            source,
        }
    }
}

/// Deferred generation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredImageRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub scene: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_id: Option<String>,
    /// Storage key the image must end up at
    #[serde(default, deserialize_with = "lenient_string")]
    pub output_filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredImageResponse {
    pub success: bool,
    pub image_url: String,
}

/// Answer for a detached deferred job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredAccepted {
    pub accepted: bool,
    pub job_id: String,
    /// Where the image will appear once the job finishes
    pub image_url: String,
}
