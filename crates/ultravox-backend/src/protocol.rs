//! OpenAI chat completion wire types, restricted to what the gateway sends and reads

use serde::{Deserialize, Serialize};

// -- Request types --

/// Streaming chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Conversation messages
    pub messages: &'a [ChatMessage],
    /// Sampling temperature
    pub temperature: f64,
    /// Always `true`; the gateway only ever streams
    pub stream: bool,
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A message made of ordered content parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl ChatMessage {
    /// System message with a single text part
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: vec![ContentPart::text(text)],
        }
    }

    /// User message with the given parts
    pub const fn user(content: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }
}

/// Individual content part of a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content
    Text { text: String },
    /// Inline audio
    InputAudio { input_audio: InputAudio },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn input_audio(data: String, format: impl Into<String>) -> Self {
        Self::InputAudio {
            input_audio: InputAudio {
                data,
                format: format.into(),
            },
        }
    }
}

/// Base64 audio payload with its container format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAudio {
    /// Base64-encoded audio bytes
    pub data: String,
    /// Format tag such as `wav`
    pub format: String,
}

// -- Stream chunk types --

/// `chat.completion.chunk` object, only the fields the relay needs
///
/// vLLM reports failures after the stream has started as an in-band frame,
/// either `{"error": {...}}` or `{"object": "error", "message": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StreamChunk {
    /// Message of an in-band error frame, if this chunk is one
    pub fn error_message(&self) -> Option<String> {
        if let Some(error) = &self.error {
            let message = match error {
                serde_json::Value::String(message) => message.clone(),
                other => other
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .map_or_else(|| other.to_string(), str::to_owned),
            };
            return Some(message);
        }

        (self.object.as_deref() == Some("error"))
            .then(|| self.message.clone().unwrap_or_else(|| "unknown backend error".to_owned()))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamChoice {
    #[serde(default)]
    pub delta: Option<StreamDelta>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

// -- Model catalog types --

/// Entry of the backend model catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub owned_by: String,
}

/// `GET /v1/models` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

/// Lenient catalog shape used when only the ids are needed
#[derive(Debug, Deserialize)]
pub(crate) struct ModelIdList {
    #[serde(default)]
    pub data: Vec<ModelId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelId {
    pub id: String,
}
