#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod google;
pub mod health;
pub mod imagegen;
mod loader;
mod secret;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use cors::*;
pub use google::*;
pub use health::*;
pub use imagegen::*;
pub use server::*;
pub use storage::*;
pub use telemetry::TelemetryConfig;
pub use tts::*;

/// Top-level service configuration
///
/// Built once at startup and handed to every endpoint; nothing reads the
/// process environment after this point.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Google Cloud credentials and endpoints
    #[serde(default)]
    pub google: GoogleConfig,
    /// Object storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Image generation configuration
    #[serde(default)]
    pub imagegen: ImageGenConfig,
    /// Speech synthesis configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
