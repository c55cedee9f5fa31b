// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for extracting time-bounded segments with an external tool
#[async_trait]
pub trait ExtractPort: Send + Sync {
    /// Extract the audio of a time range into an MP3 file
    async fn extract_audio_segment(
        &self,
        request: &ExtractionRequest,
    ) -> Result<PathBuf, DomainError>;

    /// Extract a time range into an MP4 file
    async fn extract_video_segment(
        &self,
        request: &ExtractionRequest,
    ) -> Result<PathBuf, DomainError>;

    /// Extract the whole audio track as 16 kHz mono PCM WAV
    async fn extract_full_audio(
        &self,
        video_path: &Path,
        output_path: &Path,
    ) -> Result<PathBuf, DomainError>;

    /// Dispatch on the requested modality
    async fn extract_segment(
        &self,
        kind: MediaKind,
        request: &ExtractionRequest,
    ) -> Result<PathBuf, DomainError> {
        match kind {
            MediaKind::Audio => self.extract_audio_segment(request).await,
            MediaKind::Video => self.extract_video_segment(request).await,
        }
    }
}

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Duration of the media container in seconds
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError>;
}

/// Port for speech-to-text transcription
#[async_trait]
pub trait TranscribePort: Send + Sync {
    /// Transcribe an audio file to plain text
    async fn transcribe(&self, audio_path: &Path) -> Result<String, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Check if directory exists
    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories); succeeds if it already exists
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Write a whole file, replacing any previous content
    async fn write_file(&self, file_path: &Path, contents: &[u8]) -> Result<(), DomainError>;

    /// Remove a file
    async fn remove_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Remove a directory only if it has no entries; returns whether it was removed
    async fn remove_empty_directory(&self, dir_path: &Path) -> Result<bool, DomainError>;
}

/// Port for operator-facing diagnostics
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    /// Directive string understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
