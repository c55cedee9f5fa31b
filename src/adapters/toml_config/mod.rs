// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExporterError, ExporterResult};
use crate::ports::LogLevel;

/// Config file locations tried when none is given explicitly
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["segex.toml", "config/segex.toml"];

/// External tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfmpegSettings {
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub video_codec: String,
    pub video_audio_codec: String,
    pub video_bitrate: String,
}

impl Default for FfmpegSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            audio_codec: "mp3".to_string(),
            audio_bitrate: "192k".to_string(),
            video_codec: "libx264".to_string(),
            video_audio_codec: "aac".to_string(),
            video_bitrate: "1000k".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Speech-to-text settings for job transcripts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Usually supplied through `OPENAI_API_KEY`; transcription is unavailable without it
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/audio/transcriptions".to_string(),
            model: "whisper-1".to_string(),
            timeout_secs: 300,
            api_key: None,
        }
    }
}

/// Complete exporter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    pub ffmpeg: FfmpegSettings,
    pub logging: LoggingSettings,
    pub transcription: TranscriptionSettings,
}

impl ExporterConfig {
    /// Validate configuration
    pub fn validate(&self) -> ExporterResult<()> {
        LogLevel::parse(&self.logging.level).map_err(|e| ExporterError::ConfigError {
            message: e.to_string(),
        })?;

        let required = [
            ("ffmpeg.ffmpeg_path", &self.ffmpeg.ffmpeg_path),
            ("ffmpeg.ffprobe_path", &self.ffmpeg.ffprobe_path),
            ("ffmpeg.audio_codec", &self.ffmpeg.audio_codec),
            ("ffmpeg.audio_bitrate", &self.ffmpeg.audio_bitrate),
            ("ffmpeg.video_codec", &self.ffmpeg.video_codec),
            ("ffmpeg.video_audio_codec", &self.ffmpeg.video_audio_codec),
            ("ffmpeg.video_bitrate", &self.ffmpeg.video_bitrate),
            ("transcription.api_url", &self.transcription.api_url),
            ("transcription.model", &self.transcription.model),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ExporterError::ConfigError {
                    message: format!("{} cannot be empty", key),
                });
            }
        }

        if self.transcription.timeout_secs == 0 {
            return Err(ExporterError::ConfigError {
                message: "transcription.timeout_secs must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Parsed log level
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.logging.level).unwrap_or(LogLevel::Info)
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: ExporterConfig,
    config_file_path: Option<PathBuf>,
}

impl TomlConfigAdapter {
    /// Create new adapter holding the default configuration
    pub fn new() -> Self {
        Self {
            config: ExporterConfig::default(),
            config_file_path: None,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Mutable access for applying overrides
    pub fn config_mut(&mut self) -> &mut ExporterConfig {
        &mut self.config
    }

    /// Consume the adapter and return the configuration
    pub fn into_config(self) -> ExporterConfig {
        self.config
    }

    /// Path of the file the configuration was loaded from, if any
    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    /// Replace the configuration with the contents of a TOML string
    pub fn load_str(&mut self, toml_content: &str) -> ExporterResult<()> {
        self.config = toml::from_str(toml_content)?;
        Ok(())
    }

    /// Load configuration from file
    pub fn load_file(&mut self, file_path: &Path) -> ExporterResult<()> {
        if !file_path.exists() {
            return Err(ExporterError::ConfigError {
                message: format!("Config file does not exist: {}", file_path.display()),
            });
        }

        let content = std::fs::read_to_string(file_path)?;
        self.load_str(&content)?;
        self.config_file_path = Some(file_path.to_path_buf());

        Ok(())
    }

    /// Load the first existing file among the candidates
    pub fn load_first_existing<P: AsRef<Path>>(&mut self, candidates: &[P]) -> ExporterResult<bool> {
        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                self.load_file(path)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Apply `SEGEX_*` and `OPENAI_API_KEY` overrides using the given variable
    /// lookup; returns the number applied
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> usize
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup("SEGEX_FFMPEG_PATH") {
            self.config.ffmpeg.ffmpeg_path = value;
            applied += 1;
        }
        if let Some(value) = lookup("SEGEX_FFPROBE_PATH") {
            self.config.ffmpeg.ffprobe_path = value;
            applied += 1;
        }
        if let Some(value) = lookup("SEGEX_LOG_LEVEL") {
            self.config.logging.level = value;
            applied += 1;
        }
        if let Some(value) = lookup("SEGEX_LOG_JSON") {
            if let Ok(json) = value.parse::<bool>() {
                self.config.logging.json = json;
                applied += 1;
            }
        }
        if let Some(value) = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()) {
            self.config.transcription.api_key = Some(value);
            applied += 1;
        }

        applied
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}
