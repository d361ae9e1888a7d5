#![allow(clippy::must_use_candidate)]

pub mod adapter;
mod env;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use adapter::AdapterConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Parley configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Upstream chat completions server
    pub adapter: AdapterConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
