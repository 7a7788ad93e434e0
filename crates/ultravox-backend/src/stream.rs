use std::fmt::Display;
use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};

use crate::error::BackendError;
use crate::protocol::StreamChunk;

/// Events decoded from a streaming chat completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Text increment of the first choice
    Delta(String),
    /// The first choice reported why generation stopped
    Finish(String),
    /// The `[DONE]` terminal marker
    Done,
}

/// Boxed stream of decoded completion events
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, BackendError>> + Send>>;

/// Decode an SSE byte stream into completion events
///
/// Only `choices[0]` is considered. In-band error frames and transport
/// failures surface as `BackendError::Stream`, data that is not a JSON chunk
/// as `BackendError::InvalidResponse`. Chunks without choices are skipped.
pub(crate) fn decode<S, B, E>(body: S) -> CompletionStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let events = body
        .eventsource()
        .map(|result| match result {
            Ok(event) => {
                let data = event.data.trim();
                if data == "[DONE]" {
                    return vec![Ok(StreamEvent::Done)];
                }

                match serde_json::from_str::<StreamChunk>(data) {
                    Ok(chunk) => match chunk.error_message() {
                        Some(message) => {
                            tracing::warn!(%message, "backend reported an error mid-stream");
                            vec![Err(BackendError::Stream(message))]
                        }
                        None => chunk_events(chunk).into_iter().map(Ok).collect(),
                    },
                    Err(e) => {
                        tracing::warn!(error = %e, data = %data, "unparseable SSE chunk");
                        vec![Err(BackendError::InvalidResponse(format!("unparseable stream chunk: {e}")))]
                    }
                }
            }
            Err(e) => vec![Err(BackendError::Stream(e.to_string()))],
        })
        .flat_map(futures_util::stream::iter);

    Box::pin(events)
}

fn chunk_events(chunk: StreamChunk) -> Vec<StreamEvent> {
    let Some(choice) = chunk.choices.into_iter().next() else {
        return Vec::new();
    };

    let mut events = Vec::with_capacity(2);

    if let Some(content) = choice.delta.and_then(|d| d.content) {
        events.push(StreamEvent::Delta(content));
    }

    if let Some(reason) = choice.finish_reason {
        events.push(StreamEvent::Finish(reason));
    }

    events
}
