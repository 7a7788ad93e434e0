//! Client for the OpenAI-compatible inference backend
//!
//! Covers the three calls the gateway makes: a streaming chat completion
//! carrying base64 audio, the model catalog, and the health probe.

#![allow(clippy::missing_errors_doc)]

mod client;
mod error;
mod http_client;
pub mod protocol;
mod stream;

pub use client::BackendClient;
pub use error::{BackendError, Result};
pub use protocol::{ChatMessage, ContentPart, InputAudio, ModelInfo, ModelsResponse, Role};
pub use stream::{CompletionStream, StreamEvent};
