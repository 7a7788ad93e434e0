use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ultravox_backend::{BackendClient, ChatMessage, CompletionStream, ContentPart};
use ultravox_config::TranscriptionConfig;

use crate::types::TranscriptionRequest;

/// Transcription service shared by all `/transcribe` requests
pub struct Server {
    backend: Arc<BackendClient>,
    config: TranscriptionConfig,
}

impl Server {
    pub const fn new(backend: Arc<BackendClient>, config: TranscriptionConfig) -> Self {
        Self { backend, config }
    }

    /// Largest accepted request body in bytes
    pub const fn max_upload_size(&self) -> usize {
        self.config.max_upload_size
    }

    /// Forward an upload to the backend and return its event stream
    ///
    /// Resolves once the backend has accepted the request, so connection and
    /// status failures are reported before anything is streamed.
    pub(crate) async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<CompletionStream> {
        let temperature = request.temperature.unwrap_or(self.config.default_temperature);
        let messages = self.compose(request);

        let stream = self.backend.stream_chat(&messages, temperature).await?;

        Ok(stream)
    }

    /// Build the system and user messages for an upload
    ///
    /// A present but empty task is kept as-is so the model answers
    /// conversationally instead of translating.
    pub(crate) fn compose(&self, request: TranscriptionRequest) -> Vec<ChatMessage> {
        let task = request.task.unwrap_or_else(|| self.config.default_task.clone());
        let audio = STANDARD.encode(&request.audio);

        vec![
            ChatMessage::system(self.config.system_prompt.as_str()),
            ChatMessage::user(vec![
                ContentPart::text(task),
                ContentPart::input_audio(audio, self.config.audio_format.as_str()),
            ]),
        ]
    }
}
