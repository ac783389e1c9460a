use std::{path::Path, time::Duration};

use crate::{Config, GoogleConfig, StorageConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text, expanding placeholders first
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Describe each absent credential and the degraded behavior it causes
    ///
    /// Loading runs before logging is initialized, so the caller reports these.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.google.api_key.is_none() {
            missing.push("google.api_key not set: moderation is skipped, generation and synthesis will fail");
        }
        if self.storage.api_key.is_none() {
            missing.push("storage.api_key not set: generated assets are returned inline");
        }

        missing
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_durations()?;
        self.validate_tts()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let base_path = &self.server.base_path;

        if !base_path.is_empty() && (!base_path.starts_with('/') || base_path.ends_with('/')) {
            anyhow::bail!("server.base_path must start with '/' and must not end with '/': `{base_path}`");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_durations(&self) -> anyhow::Result<()> {
        self.google.timeout()?;
        self.storage.timeout()?;

        if self.storage.upload_token_ttl()?.is_zero() {
            anyhow::bail!("storage.upload_token_ttl must be greater than zero");
        }

        Ok(())
    }

    fn validate_tts(&self) -> anyhow::Result<()> {
        if !(0.25..=4.0).contains(&self.tts.speaking_rate) {
            anyhow::bail!("tts.speaking_rate must be between 0.25 and 4.0");
        }

        if !(-20.0..=20.0).contains(&self.tts.pitch) {
            anyhow::bail!("tts.pitch must be between -20.0 and 20.0");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let sampling_rate = self
            .telemetry
            .as_ref()
            .and_then(|t| t.tracing.as_ref())
            .map(|t| t.sampling_rate);

        if let Some(rate) = sampling_rate
            && !(0.0..=1.0).contains(&rate)
        {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0");
        }

        Ok(())
    }
}

impl GoogleConfig {
    /// Parsed provider call timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is invalid
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        parse_duration("google.timeout", &self.timeout)
    }
}

impl StorageConfig {
    /// Parsed upload timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is invalid
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        parse_duration("storage.timeout", &self.timeout)
    }

    /// Parsed advisory lifetime of upload tokens
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string is invalid
    pub fn upload_token_ttl(&self) -> anyhow::Result<Duration> {
        parse_duration("storage.upload_token_ttl", &self.upload_token_ttl)
    }
}

fn parse_duration(field: &str, value: &str) -> anyhow::Result<Duration> {
    duration_str::parse(value).map_err(|e| anyhow::anyhow!("invalid duration for {field} '{value}': {e}"))
}
