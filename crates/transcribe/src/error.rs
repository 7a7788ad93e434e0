use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;
use ultravox_backend::BackendError;
use ultravox_core::HttpError;

pub type Result<T, E = TranscribeError> = std::result::Result<T, E>;

/// Errors raised while accepting or forwarding a transcription
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// Body is not `multipart/form-data`
    #[error("Unsupported Content-Type, expected: 'Content-Type: multipart/form-data'")]
    UnsupportedMediaType,

    /// The form has no `audio_file` part
    #[error("Missing required 'audio_file' field in multipart form")]
    MissingAudio,

    /// The multipart body could not be read
    #[error("{message}")]
    Multipart { status: StatusCode, message: String },

    /// A form field had an unusable value
    #[error("Invalid {field} value: {message}")]
    InvalidField { field: &'static str, message: String },

    /// The backend rejected or never received the request
    #[error("backend request failed: {0}")]
    Backend(#[from] BackendError),
}

impl From<axum::extract::multipart::MultipartError> for TranscribeError {
    fn from(error: axum::extract::multipart::MultipartError) -> Self {
        Self::Multipart {
            status: error.status(),
            message: error.body_text(),
        }
    }
}

impl HttpError for TranscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MissingAudio | Self::InvalidField { .. } => StatusCode::BAD_REQUEST,
            Self::Multipart { status, .. } => *status,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::UnsupportedMediaType | Self::MissingAudio | Self::InvalidField { .. } | Self::Multipart { .. } => {
                "invalid_request_error"
            }
            Self::Backend(_) => "upstream_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for TranscribeError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ultravox_core::error_body(&self))).into_response()
    }
}
