use serde::Deserialize;

use super::exporters::ExporterConfig;

/// Span sampling and export
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TracingConfig {
    /// Sampling rate (0.0 to 1.0)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
    /// Respect the sampling decision of the parent span
    #[serde(default = "default_true")]
    pub parent_based: bool,
    /// Override the default exporter for tracing
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            sampling_rate: default_sampling_rate(),
            parent_based: true,
            exporter: None,
        }
    }
}

const fn default_sampling_rate() -> f64 {
    1.0
}

const fn default_true() -> bool {
    true
}
