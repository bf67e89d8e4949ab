use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::{Config, GatewayConfig, GenerationConfig, TelemetryConfig};

/// Environment variables consulted for the API key, in order
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion or parsing
    /// fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
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

    /// Build configuration from the process environment alone
    ///
    /// The API key comes from the first set variable in [`API_KEY_VARS`].
    ///
    /// # Errors
    ///
    /// Returns an error if no API key variable is set
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|value| !value.trim().is_empty()))
            .ok_or_else(|| anyhow::anyhow!("API key not set: export one of {}", API_KEY_VARS.join(", ")))?;

        let config = Self {
            gateway: GatewayConfig::with_api_key(SecretString::from(api_key)),
            generation: GenerationConfig::default(),
            telemetry: TelemetryConfig::default(),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or a model name is empty, or the
    /// timeout cannot be parsed
    pub fn validate(&self) -> anyhow::Result<()> {
        let gateway = &self.gateway;

        if gateway.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("gateway.api_key must not be empty");
        }

        for (field, value) in [
            ("extraction_model", &gateway.extraction_model),
            ("image_model", &gateway.image_model),
            ("edit_model", &gateway.edit_model),
            ("output_mime_type", &gateway.output_mime_type),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("gateway.{field} must not be empty");
            }
        }

        if gateway.base_url.cannot_be_a_base() {
            anyhow::bail!("gateway.base_url must be a hierarchical URL: {}", gateway.base_url);
        }

        gateway.request_timeout()?;

        Ok(())
    }
}
