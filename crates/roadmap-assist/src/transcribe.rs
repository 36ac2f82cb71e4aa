//! Speech-to-text for recorded questions.

use crate::provider::{ProviderError, http_agent, read_api_key, read_body};
use std::path::Path;
use std::time::Duration;

/// Converts an audio recording into text.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio_path: &Path) -> Result<String, ProviderError>;
}

/// OpenAI Whisper transcription (`/v1/audio/transcriptions`).
pub struct WhisperTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    agent: ureq::Agent,
}

const BOUNDARY: &str = "----roadmap-audio-boundary-7d1c";

impl WhisperTranscriber {
    pub const DEFAULT_MODEL: &str = "whisper-1";
    const DEFAULT_BASE_URL: &str = "https://api.openai.com";

    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            api_key,
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: base_url.unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            agent: http_agent(timeout),
        }
    }

    /// Build from `OPENAI_API_KEY`; Whisper is only offered by OpenAI.
    pub fn from_env(base_url: Option<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = read_api_key("whisper", "OPENAI_API_KEY")?;
        Ok(Self::new(api_key, base_url, timeout))
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, audio_path: &Path) -> Result<String, ProviderError> {
        let audio = std::fs::read(audio_path)?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav");
        let body = multipart_body(
            BOUNDARY,
            &[("model", self.model.as_str()), ("response_format", "text")],
            file_name,
            &audio,
        );

        let url = format!(
            "{}/v1/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );
        tracing::debug!(bytes = audio.len(), file = file_name, "uploading audio");

        let mut response = self
            .agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header(
                "content-type",
                &format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .send(&body[..])?;

        let text = read_body(&mut response)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Encode text fields plus one file part as `multipart/form-data`.
pub(crate) fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file_name: &str,
    file: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(file.len() + 512);
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            file_name.replace('"', "")
        )
        .as_bytes(),
    );
    body.extend_from_slice(file);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
