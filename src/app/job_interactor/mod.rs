// Job interactor - Runs a complete export job and records its summary

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::export_interactor::SegmentExporter;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::error::ExporterResult;
use crate::ports::*;

/// Description of one export job, usually read from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    #[serde(default)]
    pub video_path: Option<PathBuf>,
    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Leave out the transcript step
    #[serde(default)]
    pub skip_transcription: bool,
}

impl JobRequest {
    /// Parse a job from JSON
    pub fn from_json_str(json: &str) -> ExporterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a job file
    pub fn from_file(path: &Path) -> ExporterResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Source path, if one was given
    fn video_path(&self) -> Option<&Path> {
        self.video_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Outcome of a job, also written as `job_summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub transcript_content: Option<String>,
    pub transcript_file: Option<PathBuf>,
    pub exported_audio_segments: Vec<PathBuf>,
    pub exported_video_segments: Vec<PathBuf>,
    pub video_path_processed: String,
    pub job_output_directory: Option<PathBuf>,
    pub source_duration_seconds: Option<f64>,
    pub job_status_file: Option<PathBuf>,
    pub error: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl JobSummary {
    fn new(video_path_processed: String, job_output_directory: Option<PathBuf>) -> Self {
        Self {
            transcript_content: None,
            transcript_file: None,
            exported_audio_segments: Vec::new(),
            exported_video_segments: Vec::new(),
            video_path_processed,
            job_output_directory,
            source_duration_seconds: None,
            job_status_file: None,
            error: None,
            completed_at: Utc::now(),
        }
    }

    /// Check whether the job finished without an error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Record an error unless an earlier one is already set
    fn set_error_if_unset(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(message.into());
        }
    }

    fn exported_nothing(&self) -> bool {
        self.exported_audio_segments.is_empty() && self.exported_video_segments.is_empty()
    }
}

/// Error reported once both job steps have run
fn consolidated_error(
    transcription_failed: bool,
    segments_requested: bool,
    exported_nothing: bool,
) -> Option<&'static str> {
    match (transcription_failed, segments_requested, exported_nothing) {
        (true, false, _) => Some("Transcription failed and no segments were requested for export."),
        (true, true, true) => Some("Transcription failed and segment export produced no files."),
        (true, true, false) => Some("Transcription failed."),
        (false, true, true) => Some("Segment export produced no files."),
        (false, _, _) => None,
    }
}

/// Interactor for the job workflow
pub struct JobInteractor {
    exporter: Arc<SegmentExporter>,
    extract_port: Arc<dyn ExtractPort>,
    transcribe_port: Option<Arc<dyn TranscribePort>>,
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl JobInteractor {
    /// Create new job interactor with injected ports.
    ///
    /// Without a transcriber every job that asks for a transcript reports
    /// the transcription as failed.
    pub fn new(
        exporter: Arc<SegmentExporter>,
        extract_port: Arc<dyn ExtractPort>,
        transcribe_port: Option<Arc<dyn TranscribePort>>,
        probe_port: Arc<dyn ProbePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            exporter,
            extract_port,
            transcribe_port,
            probe_port,
            fs_port,
            log_port,
        }
    }

    /// Execute a job: transcript first, then segment export, then the summary file.
    ///
    /// Problems are reported through `JobSummary::error`; an `Err` is only
    /// returned when an output directory cannot be created.
    pub async fn process_job(&self, request: &JobRequest) -> Result<JobSummary, DomainError> {
        let Some(video_path) = self.existing_video(request).await else {
            let shown = request
                .video_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "Not provided".to_string());
            let message = format!(
                "Video path '{}' not provided or video does not exist.",
                shown
            );
            self.log_port.error(&message).await;

            let mut summary = JobSummary::new(shown, request.output_dir.clone());
            summary.error = Some(message);
            return Ok(summary);
        };

        let output_dir = match request.output_dir.as_deref() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => {
                let default_dir = JobLayout::default_output_dir(video_path);
                self.log_port
                    .warn(&format!(
                        "'output_dir' not specified. Using default: {}",
                        default_dir.display()
                    ))
                    .await;
                default_dir
            }
        };

        let mut summary = JobSummary::new(
            video_path.display().to_string(),
            Some(output_dir.clone()),
        );
        self.fs_port.create_directory(&output_dir).await?;

        match self.probe_port.probe_duration(video_path).await {
            Ok(duration) => {
                self.log_port
                    .info(&format!(
                        "Source duration: {:.3}s ({})",
                        duration,
                        video_path.display()
                    ))
                    .await;
                summary.source_duration_seconds = Some(duration);
            }
            Err(e) => {
                self.log_port
                    .warn(&format!("Could not probe {}: {}", video_path.display(), e))
                    .await;
            }
        }

        let transcription_failed = if request.skip_transcription {
            self.log_port
                .info("Transcription skipped for this job.")
                .await;
            false
        } else {
            match self.transcribe(video_path, &output_dir).await {
                Some(text) => {
                    self.save_transcript(&output_dir, &text, &mut summary).await;
                    summary.transcript_content = Some(text);
                    false
                }
                None => {
                    self.log_port
                        .warn(&format!("Transcription failed for {}.", video_path.display()))
                        .await;
                    true
                }
            }
        };

        if request.segments.is_empty() {
            self.log_port
                .info("No segments specified in the job. Skipping segment export.")
                .await;
        } else {
            let segments_dir = JobLayout::segments_dir(&output_dir);
            self.log_port
                .info(&format!(
                    "Exporting segments from {} to {}...",
                    video_path.display(),
                    segments_dir.display()
                ))
                .await;

            let exported = self
                .exporter
                .export(video_path, &request.segments, &segments_dir)
                .await?;
            self.log_port
                .info(&format!(
                    "Segment export complete. Audio: {}, Video: {} segments.",
                    exported.audio_segments.len(),
                    exported.video_segments.len()
                ))
                .await;

            summary.exported_audio_segments = exported.audio_segments;
            summary.exported_video_segments = exported.video_segments;
        }

        if let Some(message) = consolidated_error(
            transcription_failed,
            !request.segments.is_empty(),
            summary.exported_nothing(),
        ) {
            summary.set_error_if_unset(message);
        }

        summary.completed_at = Utc::now();
        self.write_summary(&output_dir, &mut summary).await;

        Ok(summary)
    }

    async fn existing_video<'a>(&self, request: &'a JobRequest) -> Option<&'a Path> {
        let path = request.video_path()?;
        matches!(self.fs_port.file_exists(path).await, Ok(true)).then_some(path)
    }

    /// Extract the full audio track, transcribe it and remove the scratch files
    async fn transcribe(&self, video_path: &Path, output_dir: &Path) -> Option<String> {
        let Some(transcriber) = &self.transcribe_port else {
            self.log_port
                .error("OPENAI_API_KEY not found in environment variables. Cannot transcribe.")
                .await;
            return None;
        };

        let temp_dir = JobLayout::temp_audio_dir(output_dir);
        let audio_path = JobLayout::transcription_audio_path(output_dir, video_path);
        self.log_port
            .info(&format!(
                "Starting transcription for {} (temp audio: {})...",
                video_path.display(),
                audio_path.display()
            ))
            .await;

        if let Err(e) = self.fs_port.create_directory(&temp_dir).await {
            self.log_port.error(&e.to_string()).await;
            return None;
        }

        let extracted = match self.extract_port.extract_full_audio(video_path, &audio_path).await {
            Ok(_) => matches!(self.fs_port.file_exists(&audio_path).await, Ok(true)),
            Err(e) => {
                self.log_port
                    .debug(&format!("Full audio extraction error: {}", e))
                    .await;
                false
            }
        };

        let transcript = if extracted {
            self.log_port
                .info(&format!("Transcribing audio file: {}", audio_path.display()))
                .await;
            match transcriber.transcribe(&audio_path).await {
                Ok(text) => {
                    self.log_port.info("Transcription successful.").await;
                    Some(text)
                }
                Err(e) => {
                    self.log_port
                        .error(&format!("Error during transcription: {}", e))
                        .await;
                    None
                }
            }
        } else {
            self.log_port
                .error(&format!(
                    "Failed to extract audio from {}. Transcription aborted.",
                    video_path.display()
                ))
                .await;
            None
        };

        self.remove_temp_audio(&audio_path, &temp_dir).await;
        transcript
    }

    async fn remove_temp_audio(&self, audio_path: &Path, temp_dir: &Path) {
        if matches!(self.fs_port.file_exists(audio_path).await, Ok(true)) {
            if let Err(e) = self.fs_port.remove_file(audio_path).await {
                self.log_port
                    .warn(&format!("Error removing temporary audio: {}", e))
                    .await;
                return;
            }
            self.log_port
                .debug(&format!("Temporary audio file {} removed.", audio_path.display()))
                .await;
        }

        if matches!(self.fs_port.directory_exists(temp_dir).await, Ok(true)) {
            match self.fs_port.remove_empty_directory(temp_dir).await {
                Ok(true) => {
                    self.log_port
                        .debug(&format!(
                            "Temporary audio directory {} removed as it was empty.",
                            temp_dir.display()
                        ))
                        .await;
                }
                Ok(false) => {}
                Err(e) => {
                    self.log_port
                        .warn(&format!("Error removing temporary audio directory: {}", e))
                        .await;
                }
            }
        }
    }

    async fn save_transcript(&self, output_dir: &Path, text: &str, summary: &mut JobSummary) {
        let transcript_path = JobLayout::transcript_path(output_dir);
        match self.fs_port.write_file(&transcript_path, text.as_bytes()).await {
            Ok(()) => {
                self.log_port
                    .info(&format!("Transcript saved to: {}", transcript_path.display()))
                    .await;
                summary.transcript_file = Some(transcript_path);
            }
            Err(e) => {
                self.log_port
                    .error(&format!(
                        "Error saving transcript to {}: {}",
                        transcript_path.display(),
                        e
                    ))
                    .await;
                summary.set_error_if_unset(format!("Failed to save transcript: {}", e));
            }
        }
    }

    /// Persist the summary; the written copy has no `job_status_file` yet
    async fn write_summary(&self, output_dir: &Path, summary: &mut JobSummary) {
        let summary_path = JobLayout::summary_path(output_dir);

        let written = match serde_json::to_vec_pretty(&*summary) {
            Ok(bytes) => self.fs_port.write_file(&summary_path, &bytes).await,
            Err(e) => Err(DomainError::InternalError(e.to_string())),
        };

        match written {
            Ok(()) => {
                self.log_port
                    .info(&format!("Job summary saved to: {}", summary_path.display()))
                    .await;
                summary.job_status_file = Some(summary_path);
            }
            Err(e) => {
                self.log_port
                    .error(&format!(
                        "Error saving job summary JSON to {}: {}",
                        summary_path.display(),
                        e
                    ))
                    .await;
                summary.set_error_if_unset(format!("Failed to save job summary: {}", e));
            }
        }
    }
}
