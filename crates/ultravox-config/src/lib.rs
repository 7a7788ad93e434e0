#![allow(clippy::must_use_candidate)]

pub mod backend;
mod duration;
mod env;
mod loader;
pub mod server;
pub mod telemetry;
pub mod transcription;

use serde::Deserialize;

pub use backend::*;
pub use server::*;
pub use telemetry::TelemetryConfig;
pub use transcription::*;

/// Top-level gateway configuration
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote inference backend
    pub backend: BackendConfig,
    /// Defaults and limits for `/transcribe`
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
