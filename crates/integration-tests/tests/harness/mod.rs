#![allow(dead_code)]

pub mod config;
pub mod mock_backend;
pub mod server;

/// A short WAV header, enough to exercise the upload path
pub const WAV_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

/// Multipart form carrying `WAV_BYTES` as `audio_file`
pub fn audio_form() -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(WAV_BYTES.to_vec())
        .file_name("clip.wav")
        .mime_str("audio/wav")
        .expect("valid mime");

    reqwest::multipart::Form::new().part("audio_file", part)
}
