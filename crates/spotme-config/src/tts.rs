use serde::Deserialize;

/// Speech synthesis voice and tuning configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Voice used when a request does not name one
    #[serde(default = "default_voice")]
    pub voice: String,
    /// BCP-47 language code of the voice
    #[serde(default = "default_language_code")]
    pub language_code: String,
    /// SSML gender sent with the voice selection
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Speaking rate, 1.0 is normal speed
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f64,
    /// Pitch offset in semitones
    #[serde(default = "default_pitch")]
    pub pitch: f64,
    /// Audio encoding requested from the provider
    #[serde(default = "default_audio_encoding")]
    pub audio_encoding: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            language_code: default_language_code(),
            gender: default_gender(),
            speaking_rate: default_speaking_rate(),
            pitch: default_pitch(),
            audio_encoding: default_audio_encoding(),
        }
    }
}

fn default_voice() -> String {
    "en-US-Neural2-J".to_string()
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_gender() -> String {
    "MALE".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_speaking_rate() -> f64 {
    0.9
}

#[allow(clippy::missing_const_for_fn)]
fn default_pitch() -> f64 {
    -2.0
}

fn default_audio_encoding() -> String {
    "MP3".to_string()
}
