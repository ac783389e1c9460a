use std::net::SocketAddr;

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Prefix every endpoint is mounted under ("" mounts at the root)
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            base_path: default_base_path(),
            health: HealthConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

fn default_base_path() -> String {
    "/api".to_string()
}
