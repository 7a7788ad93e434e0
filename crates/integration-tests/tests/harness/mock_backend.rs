//! Mock inference backend for integration tests
//!
//! Serves the RunPod-style layout the gateway talks to: an OpenAI-compatible
//! streaming chat endpoint under `/openai/v1`, the catalog at `/v1/models`
//! and `/health` at the root.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// How the mock answers chat and catalog requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Stream the content, a finish reason and `[DONE]`
    Complete,
    /// Stream the content then close without any completion marker
    Truncated,
    /// Answer every chat and catalog request with 500
    Failing,
    /// Stream the content, an in-band error frame, then `[DONE]`
    ErrorFrame,
    /// Stream one word every few milliseconds, forever
    Endless,
}

/// Mock backend that returns predictable responses
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    behavior: Behavior,
    content: String,
    health_status: StatusCode,
    completion_count: AtomicU32,
    catalog_count: AtomicU32,
    last_request: Mutex<Option<serde_json::Value>>,
    last_authorization: Mutex<Option<String>>,
    stream_released: AtomicBool,
}

impl MockBackend {
    /// Start a well-behaved mock
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Complete, "Hello from mock backend", StatusCode::OK).await
    }

    /// Start a mock with the given behavior
    pub async fn start_with(behavior: Behavior) -> anyhow::Result<Self> {
        Self::start_inner(behavior, "Hello from mock backend", StatusCode::OK).await
    }

    /// Start a mock that streams `content` word by word
    pub async fn start_with_response(content: &str) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Complete, content, StatusCode::OK).await
    }

    /// Start a mock whose `/health` answers with `status`
    pub async fn start_with_health(status: StatusCode) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Complete, "Hello from mock backend", status).await
    }

    async fn start_inner(behavior: Behavior, content: &str, health_status: StatusCode) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            content: content.to_owned(),
            health_status,
            completion_count: AtomicU32::new(0),
            catalog_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
            last_authorization: Mutex::new(None),
            stream_released: AtomicBool::new(false),
        });

        let app = Router::new()
            .route("/openai/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/v1/models", routing::get(handle_models))
            .route("/health", routing::get(handle_health))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Backend root, as configured in `backend.base_url`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of chat completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// Number of catalog requests received
    pub fn catalog_count(&self) -> u32 {
        self.state.catalog_count.load(Ordering::Relaxed)
    }

    /// Body of the most recent chat completion request
    pub fn last_request(&self) -> Option<serde_json::Value> {
        self.state.last_request.lock().unwrap().clone()
    }

    /// Whether an endless stream has been dropped by the server
    ///
    /// Happens once writing to the gateway fails, i.e. after it closed the
    /// connection.
    pub fn stream_released(&self) -> bool {
        self.state.stream_released.load(Ordering::Relaxed)
    }

    /// `Authorization` header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Wire types matching OpenAI format --

#[derive(Debug, Serialize)]
struct StreamChunk {
    id: &'static str,
    object: &'static str,
    created: u64,
    model: String,
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Serialize)]
struct StreamChoice {
    index: u32,
    delta: StreamDelta,
    finish_reason: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct StreamDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ModelListResponse {
    object: &'static str,
    data: Vec<ModelObject>,
}

#[derive(Debug, Serialize)]
struct ModelObject {
    id: &'static str,
    object: &'static str,
    created: u64,
    owned_by: &'static str,
}

fn record_authorization(state: &MockState, headers: &HeaderMap) {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    *state.last_authorization.lock().unwrap() = value;
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": {
                "message": "mock server intentional failure",
                "type": "server_error"
            }
        })),
    )
        .into_response()
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(req): Json<serde_json::Value>,
) -> Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    record_authorization(&state, &headers);
    *state.last_request.lock().unwrap() = Some(req.clone());

    if state.behavior == Behavior::Failing {
        return failure();
    }

    if state.behavior == Behavior::Endless {
        return endless_stream(Arc::clone(&state));
    }

    let model = req["model"].as_str().unwrap_or_default().to_owned();
    let chunk = |delta: StreamDelta, finish_reason: Option<&'static str>| StreamChunk {
        id: "chatcmpl-mock",
        object: "chat.completion.chunk",
        created: 1_700_000_000,
        model: model.clone(),
        choices: vec![StreamChoice {
            index: 0,
            delta,
            finish_reason,
        }],
    };

    let mut frames = vec![chunk(
        StreamDelta {
            role: Some("assistant"),
            content: Some(String::new()),
        },
        None,
    )];

    let words: Vec<&str> = state.content.split(' ').collect();
    let last = words.len() - 1;
    for (i, word) in words.iter().enumerate() {
        let content = if i == last { (*word).to_owned() } else { format!("{word} ") };
        frames.push(chunk(
            StreamDelta {
                role: None,
                content: Some(content),
            },
            None,
        ));
    }

    let mut body = String::new();
    for frame in &frames {
        body.push_str(&format!("data: {}\n\n", serde_json::to_string(frame).unwrap()));
    }

    if state.behavior == Behavior::Complete {
        let finish = chunk(
            StreamDelta {
                role: None,
                content: None,
            },
            Some("stop"),
        );
        body.push_str(&format!("data: {}\n\n", serde_json::to_string(&finish).unwrap()));
        body.push_str("data: [DONE]\n\n");
    }

    if state.behavior == Behavior::ErrorFrame {
        body.push_str("data: {\"error\":{\"message\":\"CUDA out of memory\",\"type\":\"InternalServerError\"}}\n\n");
        body.push_str("data: [DONE]\n\n");
    }

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/event-stream")],
        body,
    )
        .into_response()
}

/// Marks the endless stream as released when the server drops it
struct ReleaseGuard(Arc<MockState>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.stream_released.store(true, Ordering::Relaxed);
    }
}

fn endless_stream(state: Arc<MockState>) -> Response {
    let frames = futures_util::stream::unfold(ReleaseGuard(state), |guard| async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let frame = "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"word \"}}]}\n\n";
        Some((Ok::<_, std::convert::Infallible>(frame), guard))
    });

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(frames),
    )
        .into_response()
}

async fn handle_models(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.catalog_count.fetch_add(1, Ordering::Relaxed);
    record_authorization(&state, &headers);

    if state.behavior == Behavior::Failing {
        return failure();
    }

    Json(ModelListResponse {
        object: "list",
        data: vec![ModelObject {
            id: "m1",
            object: "model",
            created: 1_700_000_000,
            owned_by: "vllm",
        }],
    })
    .into_response()
}

async fn handle_health(State(state): State<Arc<MockState>>) -> StatusCode {
    state.health_status
}
