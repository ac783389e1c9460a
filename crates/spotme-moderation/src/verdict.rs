use serde::Serialize;

use crate::annotation::SafeSearchAnnotation;

pub const UNSAFE_REASON: &str = "Image contains inappropriate content";

/// Moderation outcome, always delivered with 200
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub safe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<SafeSearchAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Verdict {
    /// No credential configured, the check did not run
    pub fn skipped() -> Self {
        Self {
            safe: true,
            skipped: Some(true),
            ..Self::default()
        }
    }

    /// The provider answered without an annotation
    pub fn no_data() -> Self {
        Self {
            safe: true,
            no_data: Some(true),
            ..Self::default()
        }
    }

    /// The check failed; the image passes
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            safe: true,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn from_annotation(annotation: SafeSearchAnnotation) -> Self {
        if annotation.is_unsafe() {
            Self {
                safe: false,
                reason: Some(UNSAFE_REASON.to_string()),
                details: Some(annotation),
                ..Self::default()
            }
        } else {
            Self {
                safe: true,
                details: Some(annotation),
                ..Self::default()
            }
        }
    }
}
