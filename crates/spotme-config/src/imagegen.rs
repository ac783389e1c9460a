use serde::Deserialize;

/// Image generation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    /// Model used by the synchronous generator
    #[serde(default = "default_model")]
    pub model: String,
    /// Model used by the deferred (scene) generator
    #[serde(default = "default_deferred_model")]
    pub deferred_model: String,
    /// Style text appended to free-form prompts
    #[serde(default = "default_style_suffix")]
    pub style_suffix: String,
    /// Aspect ratio requested for scene images
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    /// Output size requested for scene images
    #[serde(default = "default_image_size")]
    pub image_size: String,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            deferred_model: default_deferred_model(),
            style_suffix: default_style_suffix(),
            aspect_ratio: default_aspect_ratio(),
            image_size: default_image_size(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_deferred_model() -> String {
    "gemini-3-pro-image-preview".to_string()
}

fn default_style_suffix() -> String {
    "Highly detailed, viral social media aesthetic, dramatic lighting, 4K quality, trending on social media."
        .to_string()
}

fn default_aspect_ratio() -> String {
    "9:16".to_string()
}

fn default_image_size() -> String {
    "2K".to_string()
}
