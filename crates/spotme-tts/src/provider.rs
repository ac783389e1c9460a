pub mod google;

use async_trait::async_trait;

use crate::types::Synthesis;

/// Trait for speech synthesis providers
#[async_trait]
pub trait SpeechProvider: Send + Sync + std::fmt::Debug {
    /// Synthesize speech, returning the base64-encoded audio
    async fn synthesize(&self, synthesis: &Synthesis<'_>) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
