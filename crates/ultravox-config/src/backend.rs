use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Model served by the Sunflower Ultravox deployment
pub const DEFAULT_MODEL: &str = "jq/sunflower-ultravox-251111";

/// Path of the OpenAI-compatible API below a RunPod serverless endpoint
const OPENAI_PATH: &str = "openai/v1";

/// Remote inference backend configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Root of the backend, serving `/v1/models` and `/health`
    pub base_url: Url,
    /// Base of the chat completions API, defaults to `<base_url>/openai/v1`
    #[serde(default)]
    pub completions_base_url: Option<Url>,
    /// Bearer token sent with every backend request
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Model identifier used for completions
    #[serde(default = "default_model")]
    pub model: String,
    /// Timeout for the model catalog call
    #[serde(default = "default_models_timeout", deserialize_with = "crate::duration::deserialize")]
    pub models_timeout: Duration,
    /// Timeout for the health probe
    #[serde(default = "default_health_timeout", deserialize_with = "crate::duration::deserialize")]
    pub health_timeout: Duration,
    /// Connect timeout applied to every backend call, including streaming
    #[serde(default = "default_connect_timeout", deserialize_with = "crate::duration::deserialize")]
    pub connect_timeout: Duration,
}

impl BackendConfig {
    /// Create a configuration for the given backend root with default settings
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            completions_base_url: None,
            api_key: None,
            model: default_model(),
            models_timeout: default_models_timeout(),
            health_timeout: default_health_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }

    /// Base URL of the chat completions API, without a trailing slash
    pub fn completions_base(&self) -> String {
        match &self.completions_base_url {
            Some(url) => url.as_str().trim_end_matches('/').to_owned(),
            None => format!("{}/{OPENAI_PATH}", self.root()),
        }
    }

    /// Backend root without a trailing slash
    pub fn root(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// The API key, treating an empty value as absent
    ///
    /// `api_key = "{{ env.RUNPOD_API_KEY | default("") }}"` expands to an
    /// empty string when the variable is unset.
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref().filter(|key| !key.expose_secret().is_empty())
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_owned()
}

const fn default_models_timeout() -> Duration {
    Duration::from_secs(10)
}

const fn default_health_timeout() -> Duration {
    Duration::from_secs(5)
}

const fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}
