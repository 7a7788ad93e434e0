use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use ultravox_config::BackendConfig;

use crate::error::{BackendError, Result};
use crate::http_client::http_client;
use crate::protocol::{ChatCompletionRequest, ChatMessage, ModelIdList, ModelsResponse};
use crate::stream::{self, CompletionStream};

/// Client for a single OpenAI-compatible inference backend
///
/// Built once at startup from [`BackendConfig`] and shared by all requests.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    root: String,
    completions_base: String,
    api_key: Option<SecretString>,
    model: String,
    models_timeout: Duration,
    health_timeout: Duration,
}

impl BackendClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Client` if the HTTP client cannot be built
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self {
            http: http_client(config)?,
            root: config.root().to_owned(),
            completions_base: config.completions_base(),
            api_key: config.api_key().cloned(),
            model: config.model.clone(),
            models_timeout: config.models_timeout,
            health_timeout: config.health_timeout,
        })
    }

    /// Model identifier sent with every completion
    pub fn model(&self) -> &str {
        &self.model
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key.expose_secret()),
            None => builder,
        }
    }

    /// Open a streaming chat completion
    ///
    /// Resolves once the backend has accepted the request; the returned
    /// stream yields events as they arrive. Dropping it closes the
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the backend
    /// answers with a non-success status
    pub async fn stream_chat(&self, messages: &[ChatMessage], temperature: f64) -> Result<CompletionStream> {
        let url = format!("{}/chat/completions", self.completions_base);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature,
            stream: true,
        };

        let response = self
            .authorize(self.http.post(&url).json(&body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "backend stream request failed");
                BackendError::transport(&e, &url)
            })?;

        let response = ensure_success(response, &url).await?;

        tracing::debug!(model = %self.model, "backend stream opened");

        Ok(stream::decode(response.bytes_stream()))
    }

    /// Fetch the model catalog
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, non-success status,
    /// or a body that does not match [`ModelsResponse`]
    pub async fn list_models(&self) -> Result<ModelsResponse> {
        let response = self.fetch_catalog().await?;

        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("failed to parse model catalog: {e}")))
    }

    /// Fetch only the model identifiers from the catalog
    ///
    /// Entries only need an `id`; a catalog without `data` yields no ids.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_models`]
    pub async fn model_ids(&self) -> Result<Vec<String>> {
        let response = self.fetch_catalog().await?;

        let list: ModelIdList = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("failed to parse model catalog: {e}")))?;

        Ok(list.data.into_iter().map(|m| m.id).collect())
    }

    async fn fetch_catalog(&self) -> Result<Response> {
        let url = format!("{}/v1/models", self.root);

        let response = self
            .authorize(self.http.get(&url).timeout(self.models_timeout))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "model catalog request failed");
                BackendError::transport(&e, &url)
            })?;

        ensure_success(response, &url).await
    }

    /// Probe the backend health endpoint
    ///
    /// Any HTTP answer counts as reachable and its status is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Connection` on transport failure or timeout
    pub async fn health(&self) -> Result<StatusCode> {
        let url = format!("{}/health", self.root);

        let response = self
            .authorize(self.http.get(&url).timeout(self.health_timeout))
            .send()
            .await
            .map_err(|e| BackendError::transport(&e, &url))?;

        Ok(response.status())
    }
}

async fn ensure_success(response: Response, url: &str) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::warn!(%status, url, "backend returned error");

    Err(BackendError::Status {
        status: status.as_u16(),
        url: url.to_owned(),
        message,
    })
}
