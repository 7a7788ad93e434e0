mod health;
mod models;
mod root;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use ultravox_backend::BackendClient;
use ultravox_config::Config;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be constructed
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address;

        let backend = Arc::new(BackendClient::new(&config.backend)?);
        let transcriber = transcribe::build_server(Arc::clone(&backend), &config.transcription);

        tracing::info!(
            backend = %config.backend.root(),
            model = %backend.model(),
            "backend configured"
        );

        // Pass-through routes
        let mut app = Router::new()
            .route("/", get(root::root_handler))
            .route("/health", get(health::health_handler))
            .route("/models", get(models::list_models_handler))
            .route("/models/list", get(models::model_names_handler))
            .with_state(backend);

        // Transcription routes
        app = app.merge(transcribe::endpoint_router(transcriber));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
