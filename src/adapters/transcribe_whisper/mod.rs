// Whisper transcription adapter - Speech-to-text over the OpenAI audio API

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::toml_config::TranscriptionSettings;
use crate::domain::errors::*;
use crate::ports::*;

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Whisper API adapter
pub struct WhisperAdapter {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl WhisperAdapter {
    /// Build an adapter when an API key is configured
    pub fn from_settings(settings: &TranscriptionSettings) -> Option<Self> {
        let api_key = settings.api_key.clone()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Some(Self {
            client,
            api_url: settings.api_url.clone(),
            model: settings.model.clone(),
            api_key,
        })
    }

    /// Extract the transcript text from an API response body
    fn parse_transcript(body: &str) -> Result<String, DomainError> {
        let response: TranscriptionResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::ProcessingError(format!("Unexpected transcription response: {}", e))
        })?;
        Ok(response.text)
    }
}

#[async_trait]
impl TranscribePort for WhisperAdapter {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, DomainError> {
        let audio = tokio::fs::read(audio_path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DomainError::FileNotFound(audio_path.display().to_string())
            }
            _ => DomainError::FsFail(format!("Failed to read {}: {}", audio_path.display(), e)),
        })?;

        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.wav".to_string());
        let part = Part::bytes(audio)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        let form = Form::new()
            .text("model", self.model.clone())
            .part("file", part);

        debug!("Uploading {} to {}", audio_path.display(), self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                DomainError::ProcessingError(format!("Transcription request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DomainError::ProcessingError(format!("Failed to read transcription response: {}", e))
        })?;

        if !status.is_success() {
            return Err(DomainError::ProcessingError(format!(
                "Transcription API returned {}: {}",
                status,
                body.trim()
            )));
        }

        Self::parse_transcript(&body)
    }
}
