use std::path::PathBuf;

use clap::Parser;

/// SpotMe API
#[derive(Debug, Parser)]
#[command(name = "spotme", about = "Moderation, image generation, speech and upload tokens for the SpotMe app")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "spotme.toml", env = "SPOTME_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "SPOTME_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter directive
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log: String,
}
