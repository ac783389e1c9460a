use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Google Cloud API configuration shared by Vision, Gemini and Text-to-Speech
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleConfig {
    /// API key sent as the `key` query parameter
    #[serde(default, deserialize_with = "crate::secret::optional_secret")]
    pub api_key: Option<SecretString>,
    /// Vision API base URL
    #[serde(default = "default_vision_url")]
    pub vision_url: Url,
    /// Generative Language API base URL
    #[serde(default = "default_generative_url")]
    pub generative_url: Url,
    /// Text-to-Speech API base URL
    #[serde(default = "default_tts_url")]
    pub tts_url: Url,
    /// Upper bound for a single provider call (e.g. "120s")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            vision_url: default_vision_url(),
            generative_url: default_generative_url(),
            tts_url: default_tts_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_vision_url() -> Url {
    Url::parse("https://vision.googleapis.com").expect("valid default URL")
}

fn default_generative_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com").expect("valid default URL")
}

fn default_tts_url() -> Url {
    Url::parse("https://texttospeech.googleapis.com").expect("valid default URL")
}

pub(crate) fn default_timeout() -> String {
    "120s".to_string()
}
