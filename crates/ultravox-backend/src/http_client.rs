use std::time::Duration;

use reqwest::Client;
use ultravox_config::BackendConfig;

use crate::error::BackendError;

/// Build the connection pool shared by all backend calls
///
/// No overall timeout is set: transcription streams run until the backend
/// closes them. Catalog and health calls set their own per-request timeout.
pub(crate) fn http_client(config: &BackendConfig) -> Result<Client, BackendError> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .build()
        .map_err(BackendError::Client)
}
