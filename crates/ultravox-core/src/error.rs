use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type so the handlers can
/// render a consistent JSON body without the domain crates knowing axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Render an error as `{"error": {"message", "type"}}`
pub fn error_body<E: HttpError + ?Sized>(error: &E) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "message": error.client_message(),
            "type": error.error_type(),
        }
    })
}
