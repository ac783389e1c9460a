use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::likelihood::Likelihood;

/// SafeSearch annotation as returned by the Vision API
///
/// Known categories are typed; anything else the provider adds is kept in
/// `extra` so the annotation can be echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafeSearchAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adult: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub racy: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SafeSearchAnnotation {
    /// Unsafe when adult, violence or racy is `LIKELY` or `VERY_LIKELY`
    ///
    /// Absent categories never contribute.
    pub fn is_unsafe(&self) -> bool {
        [&self.adult, &self.violence, &self.racy]
            .into_iter()
            .flatten()
            .any(|value| Likelihood::parse(value).is_flagged())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateRequest<'a> {
    pub requests: [AnnotateImageRequest<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct AnnotateImageRequest<'a> {
    pub image: Image<'a>,
    pub features: [Feature; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct Image<'a> {
    pub source: ImageSource<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageSource<'a> {
    pub image_uri: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl<'a> AnnotateRequest<'a> {
    pub fn safe_search(image_uri: &'a str) -> Self {
        Self {
            requests: [AnnotateImageRequest {
                image: Image {
                    source: ImageSource { image_uri },
                },
                features: [Feature {
                    kind: "SAFE_SEARCH_DETECTION",
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateImageResponse {
    #[serde(default)]
    pub safe_search_annotation: Option<SafeSearchAnnotation>,
    #[serde(default)]
    pub error: Option<Value>,
}
