/// A parsed `/transcribe` upload
///
/// `task` and `temperature` stay `None` when the form omitted them; the
/// configured defaults are applied when the backend request is composed.
#[derive(Debug)]
pub struct TranscriptionRequest {
    /// Raw audio data, passed through unvalidated
    pub audio: Vec<u8>,
    /// Original filename
    pub filename: Option<String>,
    /// Content type of the uploaded part
    pub content_type: Option<String>,
    /// Task instruction placed before the audio
    pub task: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f64>,
}
