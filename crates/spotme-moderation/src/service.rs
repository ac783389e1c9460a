use crate::{annotation::SafeSearchAnnotation, client::VisionClient, error::ModerationError, verdict::Verdict};

/// Fail-open moderation check
///
/// Every outcome, including provider failure, resolves to a [`Verdict`].
#[derive(Debug)]
pub struct ModerationService {
    vision: Option<VisionClient>,
}

impl ModerationService {
    /// `None` disables moderation: every image is reported safe and skipped
    pub fn new(vision: Option<VisionClient>) -> Self {
        Self { vision }
    }

    pub async fn check(&self, image_url: &str) -> Verdict {
        let Some(vision) = &self.vision else {
            tracing::warn!("moderation skipped: google.api_key not configured");
            return Verdict::skipped();
        };

        match vision.safe_search(image_url).await {
            Ok(Some(annotation)) => judge(annotation),
            Ok(None) => {
                tracing::warn!("vision returned no safe search annotation");
                Verdict::no_data()
            }
            Err(ModerationError::Api { status, .. }) => {
                tracing::warn!(status, "moderation failed open on vision error");
                Verdict::failed("Vision API error")
            }
            Err(e) => {
                tracing::warn!(error = %e, "moderation failed open");
                Verdict::failed(e.to_string())
            }
        }
    }
}

fn judge(annotation: SafeSearchAnnotation) -> Verdict {
    let verdict = Verdict::from_annotation(annotation);

    tracing::info!(
        safe = verdict.safe,
        adult = verdict.details.as_ref().and_then(|d| d.adult.as_deref()),
        violence = verdict.details.as_ref().and_then(|d| d.violence.as_deref()),
        racy = verdict.details.as_ref().and_then(|d| d.racy.as_deref()),
        "moderation verdict"
    );

    verdict
}
