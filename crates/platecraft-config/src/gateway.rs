use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default Google Generative Language API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the generative AI backend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// API key sent with every request
    pub api_key: SecretString,
    /// Base URL override
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Model used to pull dish names out of menu text
    #[serde(default = "default_extraction_model")]
    pub extraction_model: String,
    /// Model used to render a dish photograph
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Model used to apply edit instructions to an existing image
    #[serde(default = "default_edit_model")]
    pub edit_model: String,
    /// Aspect ratio requested for generated images
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    /// MIME type requested for generated images
    #[serde(default = "default_output_mime_type")]
    pub output_mime_type: String,
    /// Per-request timeout (e.g. "90s"); unset means no timeout
    #[serde(default)]
    pub timeout: Option<String>,
}

impl GatewayConfig {
    /// Build a gateway config with defaults for everything but the key
    pub fn with_api_key(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: default_base_url(),
            extraction_model: default_extraction_model(),
            image_model: default_image_model(),
            edit_model: default_edit_model(),
            aspect_ratio: default_aspect_ratio(),
            output_mime_type: default_output_mime_type(),
            timeout: None,
        }
    }

    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the configured duration string is invalid
    pub fn request_timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|raw| duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid gateway timeout '{raw}': {e}")))
            .transpose()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

fn default_extraction_model() -> String {
    "gemini-2.5-flash".to_owned()
}

fn default_image_model() -> String {
    "imagen-4.0-generate-001".to_owned()
}

fn default_edit_model() -> String {
    "gemini-2.5-flash-image".to_owned()
}

fn default_aspect_ratio() -> String {
    "1:1".to_owned()
}

fn default_output_mime_type() -> String {
    "image/png".to_owned()
}
