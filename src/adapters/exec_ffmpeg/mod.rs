//! FFmpeg execution adapter
//!
//! Runs the `ffmpeg` command-line tool once per extraction. Output files are
//! always overwritten, so repeated exports of the same segment replace the
//! previous files instead of failing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::adapters::toml_config::FfmpegSettings;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Number of stderr lines kept in error messages
const STDERR_TAIL_LINES: usize = 8;

/// FFmpeg-based extraction adapter
pub struct FFmpegAdapter {
    settings: FfmpegSettings,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(settings: FfmpegSettings) -> Self {
        Self { settings }
    }

    /// Arguments shared by both modalities: quiet, non-interactive, overwrite,
    /// then an input seeked to the requested range
    fn input_args(request: &ExtractionRequest) -> Vec<OsString> {
        vec![
            "-nostdin".into(),
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-ss".into(),
            request.start.clone().into(),
            "-to".into(),
            request.end.clone().into(),
            "-i".into(),
            request.video_path.clone().into_os_string(),
        ]
    }

    /// Full argument list for an MP3 audio extraction
    pub fn audio_args(&self, request: &ExtractionRequest) -> Vec<OsString> {
        let mut args = Self::input_args(request);
        let output: [OsString; 6] = [
            "-vn".into(),
            "-acodec".into(),
            self.settings.audio_codec.clone().into(),
            "-b:a".into(),
            self.settings.audio_bitrate.clone().into(),
            request.output_path.clone().into_os_string(),
        ];
        args.extend(output);
        args
    }

    /// Full argument list for an MP4 video extraction
    pub fn video_args(&self, request: &ExtractionRequest) -> Vec<OsString> {
        let mut args = Self::input_args(request);
        let output: [OsString; 11] = [
            "-c:v".into(),
            self.settings.video_codec.clone().into(),
            "-c:a".into(),
            self.settings.video_audio_codec.clone().into(),
            "-strict".into(),
            "experimental".into(),
            "-b:v".into(),
            self.settings.video_bitrate.clone().into(),
            "-b:a".into(),
            self.settings.audio_bitrate.clone().into(),
            request.output_path.clone().into_os_string(),
        ];
        args.extend(output);
        args
    }

    /// Full argument list for the transcription input: the whole audio track
    /// as 16 kHz mono 16-bit PCM
    pub fn full_audio_args(video_path: &Path, output_path: &Path) -> Vec<OsString> {
        vec![
            "-nostdin".into(),
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-i".into(),
            video_path.as_os_str().to_os_string(),
            "-vn".into(),
            "-acodec".into(),
            "pcm_s16le".into(),
            "-ac".into(),
            "1".into(),
            "-ar".into(),
            "16k".into(),
            output_path.as_os_str().to_os_string(),
        ]
    }

    async fn run(
        &self,
        label: &str,
        source: &Path,
        output_path: &Path,
        args: Vec<OsString>,
    ) -> Result<PathBuf, DomainError> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    DomainError::FsFail(format!(
                        "Failed to create output directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        debug!("Running {} for {}: {:?}", self.settings.ffmpeg_path, label, args);

        let output = Command::new(&self.settings.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::ProcessingError(format!(
                    "Failed to launch {}: {}",
                    self.settings.ffmpeg_path, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail = stderr_tail(&stderr);
            error!(
                "Error extracting {} from {} (output: {})",
                label,
                source.display(),
                output_path.display()
            );
            error!("FFmpeg stderr: {}", if tail.is_empty() { "N/A" } else { tail.as_str() });
            return Err(DomainError::ProcessingError(format!(
                "ffmpeg exited with {} while extracting {}: {}",
                output.status, label, tail
            )));
        }

        debug!("{} extracted to {}", label, output_path.display());
        Ok(output_path.to_path_buf())
    }

    async fn run_segment(
        &self,
        kind: MediaKind,
        request: &ExtractionRequest,
        args: Vec<OsString>,
    ) -> Result<PathBuf, DomainError> {
        let label = format!("{} segment {} - {}", kind, request.start, request.end);
        self.run(&label, &request.video_path, &request.output_path, args)
            .await
    }
}

/// Keep the last few non-empty lines of a stderr dump
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let skip = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[skip..].join("\n")
}

#[async_trait]
impl ExtractPort for FFmpegAdapter {
    async fn extract_audio_segment(
        &self,
        request: &ExtractionRequest,
    ) -> Result<PathBuf, DomainError> {
        let args = self.audio_args(request);
        self.run_segment(MediaKind::Audio, request, args).await
    }

    async fn extract_video_segment(
        &self,
        request: &ExtractionRequest,
    ) -> Result<PathBuf, DomainError> {
        let args = self.video_args(request);
        self.run_segment(MediaKind::Video, request, args).await
    }

    async fn extract_full_audio(
        &self,
        video_path: &Path,
        output_path: &Path,
    ) -> Result<PathBuf, DomainError> {
        let args = Self::full_audio_args(video_path, output_path);
        self.run("full audio", video_path, output_path, args).await
    }
}
