use axum::body::Bytes;
use futures_util::{Stream, StreamExt, stream};
use ultravox_backend::{BackendError, CompletionStream, StreamEvent};

struct Relay {
    events: CompletionStream,
    finished: bool,
    relayed: usize,
}

/// Turn backend events into response body chunks
///
/// Each non-empty delta is forwarded as soon as it arrives. `[DONE]` ends
/// the body cleanly. A backend error, or an end of stream with neither
/// `[DONE]` nor a finish reason, ends the body with an error so the caller
/// sees an aborted response instead of a silently short transcript.
pub(crate) fn relay(events: CompletionStream) -> impl Stream<Item = Result<Bytes, BackendError>> + Send + 'static {
    let state = Relay {
        events,
        finished: false,
        relayed: 0,
    };

    stream::unfold(Some(state), |state| async move {
        let mut relay = state?;

        loop {
            match relay.events.next().await {
                Some(Ok(StreamEvent::Delta(text))) => {
                    if text.is_empty() {
                        continue;
                    }
                    relay.relayed += text.len();
                    return Some((Ok(Bytes::from(text)), Some(relay)));
                }
                Some(Ok(StreamEvent::Finish(reason))) => {
                    tracing::debug!(%reason, "backend finished generating");
                    relay.finished = true;
                }
                Some(Ok(StreamEvent::Done)) => {
                    tracing::debug!(bytes = relay.relayed, "transcription stream complete");
                    return None;
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, bytes = relay.relayed, "transcription stream failed");
                    return Some((Err(e), None));
                }
                None if relay.finished => {
                    tracing::debug!(bytes = relay.relayed, "transcription stream closed after finish");
                    return None;
                }
                None => {
                    tracing::warn!(bytes = relay.relayed, "backend closed the stream early");
                    return Some((Err(BackendError::Truncated), None));
                }
            }
        }
    })
}
