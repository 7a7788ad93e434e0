use std::path::Path;

use crate::Config;

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

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(
            backend = %config.backend.root(),
            model = %config.backend.model,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_backend()?;
        self.validate_transcription()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_backend(&self) -> anyhow::Result<()> {
        let backend = &self.backend;

        if backend.model.trim().is_empty() {
            anyhow::bail!("backend.model must not be empty");
        }

        for (name, timeout) in [
            ("models_timeout", backend.models_timeout),
            ("health_timeout", backend.health_timeout),
            ("connect_timeout", backend.connect_timeout),
        ] {
            if timeout.is_zero() {
                anyhow::bail!("backend.{name} must be greater than zero");
            }
        }

        Ok(())
    }

    fn validate_transcription(&self) -> anyhow::Result<()> {
        let transcription = &self.transcription;

        if !(0.0..=2.0).contains(&transcription.default_temperature) {
            anyhow::bail!(
                "transcription.default_temperature must be between 0.0 and 2.0, got {}",
                transcription.default_temperature
            );
        }

        if transcription.audio_format.trim().is_empty() {
            anyhow::bail!("transcription.audio_format must not be empty");
        }

        if transcription.max_upload_size == 0 {
            anyhow::bail!("transcription.max_upload_size must be greater than zero");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        if let Some(ref telemetry) = self.telemetry
            && let Some(ref tracing) = telemetry.tracing
            && !(0.0..=1.0).contains(&tracing.sampling_rate)
        {
            anyhow::bail!(
                "telemetry.tracing.sampling_rate must be between 0.0 and 1.0, got {}",
                tracing.sampling_rate
            );
        }

        Ok(())
    }
}
