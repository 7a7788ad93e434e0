use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::extract::multipart::Field;
use axum::response::{IntoResponse, Response};

use crate::error::TranscribeError;
use crate::types::TranscriptionRequest;

/// Extractor for the `/transcribe` multipart form
///
/// Recognized parts: `audio_file` (required), `task`, `temperature`.
/// Other parts are ignored.
pub struct ExtractMultipart(pub TranscriptionRequest);

impl<S> FromRequest<S> for ExtractMultipart
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        parse(request, state).await.map(Self).map_err(IntoResponse::into_response)
    }
}

async fn parse<S>(request: http::Request<Body>, state: &S) -> Result<TranscriptionRequest, TranscribeError>
where
    S: Send + Sync,
{
    let is_multipart = request
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("multipart/form-data"));

    if !is_multipart {
        return Err(TranscribeError::UnsupportedMediaType);
    }

    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|e| TranscribeError::Multipart {
            status: e.status(),
            message: format!("Failed to parse multipart form: {}", e.body_text()),
        })?;

    let mut audio = None;
    let mut filename = None;
    let mut content_type = None;
    let mut task = None;
    let mut temperature = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();

        match name.as_str() {
            "audio_file" => {
                filename = field.file_name().map(str::to_owned);
                content_type = field.content_type().map(str::to_owned);
                audio = Some(field.bytes().await?.to_vec());
            }
            "task" => task = Some(read_text(field).await?),
            "temperature" => {
                let raw = read_text(field).await?;
                temperature = Some(parse_temperature(&raw)?);
            }
            _ => {}
        }
    }

    let audio = audio.ok_or(TranscribeError::MissingAudio)?;

    Ok(TranscriptionRequest {
        audio,
        filename,
        content_type,
        task,
        temperature,
    })
}

/// A finite float; `nan` and `inf` would serialize as `null`
fn parse_temperature(raw: &str) -> Result<f64, TranscribeError> {
    let invalid = |message: String| TranscribeError::InvalidField {
        field: "temperature",
        message,
    };

    let value = raw.trim().parse::<f64>().map_err(|e| invalid(format!("'{raw}': {e}")))?;

    if !value.is_finite() {
        return Err(invalid(format!("'{raw}': must be a finite number")));
    }

    Ok(value)
}

async fn read_text(field: Field<'_>) -> Result<String, TranscribeError> {
    Ok(field.text().await?)
}
