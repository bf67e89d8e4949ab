use serde::Deserialize;

use crate::ImageStyle;

/// Batch generation settings
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Style used when none is picked explicitly
    #[serde(default)]
    pub default_style: ImageStyle,
}
