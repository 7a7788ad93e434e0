use axum::Json;
use serde_json::{Value, json};

/// Liveness handler, independent of backend reachability
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Audio transcription API",
    }))
}
