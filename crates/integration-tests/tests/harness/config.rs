//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use ultravox_config::{BackendConfig, Config, ServerConfig, TranscriptionConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder pointed at the given backend root
    pub fn new(base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
                },
                backend: BackendConfig::new(base_url.parse().expect("valid URL")),
                transcription: TranscriptionConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Send a bearer token on every backend call
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.config.backend.api_key = Some(SecretString::from(key));
        self
    }

    /// Set the model sent with completions
    pub fn with_model(mut self, model: &str) -> Self {
        model.clone_into(&mut self.config.backend.model);
        self
    }

    /// Cap the accepted upload size
    pub fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.config.transcription.max_upload_size = bytes;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
