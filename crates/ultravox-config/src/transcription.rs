use serde::Deserialize;

/// Persona prompt sent as the system message of every transcription
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Sunflower, a helpful assistant made by Sunbird AI who understands all Ugandan languages. You specialise in accurate translations, explanations, summaries and other language tasks.";

/// Task used when the upload carries no `task` field
pub const DEFAULT_TASK: &str = "Translate to English: ";

/// Settings for the `/transcribe` endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// System message content
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Task instruction used when the request has none
    #[serde(default = "default_task")]
    pub default_task: String,
    /// Sampling temperature used when the request has none
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
    /// Format tag attached to the `input_audio` part
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            default_task: default_task(),
            default_temperature: default_temperature(),
            audio_format: default_audio_format(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_owned()
}

fn default_task() -> String {
    DEFAULT_TASK.to_owned()
}

const fn default_temperature() -> f64 {
    0.1
}

fn default_audio_format() -> String {
    "wav".to_owned()
}

const fn default_max_upload_size() -> usize {
    100 << 20
}
