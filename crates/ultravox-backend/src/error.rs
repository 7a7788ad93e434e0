use thiserror::Error;

pub type Result<T, E = BackendError> = std::result::Result<T, E>;

/// Failures talking to the inference backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network failure or timeout before a response arrived
    #[error("{0}")]
    Connection(String),

    /// The backend answered with a non-success status
    #[error("backend returned {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// The event stream failed after it started
    #[error("stream error: {0}")]
    Stream(String),

    /// The event stream ended without a completion marker
    #[error("stream ended before the backend signalled completion")]
    Truncated,
}

impl BackendError {
    /// Map a transport error, naming the timeout when that was the cause
    pub(crate) fn transport(error: &reqwest::Error, url: &str) -> Self {
        if error.is_timeout() {
            Self::Connection(format!("request to {url} timed out"))
        } else {
            Self::Connection(format!("request to {url} failed: {error}"))
        }
    }
}
