#![allow(clippy::must_use_candidate)]

//! Configuration for platecraft
//!
//! Loaded from a TOML file with `{{ env.VAR }}` expansion, or assembled
//! straight from the process environment when no file is given

mod env;
pub mod gateway;
pub mod generation;
mod loader;
pub mod style;
pub mod telemetry;

use serde::Deserialize;

pub use gateway::*;
pub use generation::*;
pub use style::ImageStyle;
pub use telemetry::*;

/// Top-level platecraft configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// AI gateway connection settings
    pub gateway: GatewayConfig,
    /// Batch generation settings
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
