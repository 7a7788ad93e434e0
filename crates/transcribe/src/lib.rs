#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod relay;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::post};
use ultravox_backend::BackendClient;
use ultravox_config::TranscriptionConfig;

pub use error::{Result, TranscribeError};
pub use server::Server;
pub use types::TranscriptionRequest;
use request::ExtractMultipart;

/// Build the transcription service
pub fn build_server(backend: Arc<BackendClient>, config: &TranscriptionConfig) -> Arc<Server> {
    Arc::new(Server::new(backend, config.clone()))
}

/// Create the router for `POST /transcribe`
pub fn endpoint_router(server: Arc<Server>) -> Router {
    let limit = server.max_upload_size();

    Router::new()
        .route("/transcribe", post(transcribe))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(server)
}

/// Handle transcription uploads
///
/// Streams the backend's text increments back as `text/plain`.
async fn transcribe(
    State(server): State<Arc<Server>>,
    ExtractMultipart(request): ExtractMultipart,
) -> Result<Response> {
    tracing::debug!(
        bytes = request.audio.len(),
        filename = request.filename.as_deref().unwrap_or_default(),
        content_type = request.content_type.as_deref().unwrap_or_default(),
        "transcription upload received"
    );

    let events = server.transcribe(request).await?;

    let headers = [(http::header::CONTENT_TYPE, "text/plain; charset=utf-8")];
    Ok((headers, Body::from_stream(relay::relay(events))).into_response())
}
