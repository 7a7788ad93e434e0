use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use ultravox_backend::{BackendClient, BackendError, ModelsResponse};

/// Catalog failure, rendered as `{"detail": ...}` with status 500
pub struct CatalogError(BackendError);

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "detail": format!("Failed to query vLLM models endpoint: {}", self.0),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<BackendError> for CatalogError {
    fn from(error: BackendError) -> Self {
        tracing::warn!(error = %error, "model catalog unavailable");
        Self(error)
    }
}

/// Model identifiers only
#[derive(Debug, Serialize)]
pub struct ModelNames {
    pub models: Vec<String>,
    pub count: usize,
}

/// `GET /models`: the backend catalog, re-serialized
pub async fn list_models_handler(
    State(backend): State<Arc<BackendClient>>,
) -> Result<Json<ModelsResponse>, CatalogError> {
    Ok(Json(backend.list_models().await?))
}

/// `GET /models/list`: just the ids and their count
pub async fn model_names_handler(State(backend): State<Arc<BackendClient>>) -> Result<Json<ModelNames>, CatalogError> {
    let models = backend.model_ids().await?;
    let count = models.len();

    Ok(Json(ModelNames { models, count }))
}
