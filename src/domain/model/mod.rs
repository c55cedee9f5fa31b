// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A requested sub-range of the source video.
///
/// Either bound may be missing; timestamps are passed through to the
/// extractor untouched, so no format validation happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl SegmentSpec {
    /// Create a segment with both bounds set
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Create a segment with only a start bound
    pub fn start_only(start: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
        }
    }

    /// Return both bounds if present and non-empty
    pub fn bounds(&self) -> Option<(&str, &str)> {
        let start = self.start.as_deref().filter(|s| !s.is_empty())?;
        let end = self.end.as_deref().filter(|s| !s.is_empty())?;
        Some((start, end))
    }

    /// Check whether both bounds are present
    pub fn is_complete(&self) -> bool {
        self.bounds().is_some()
    }
}

/// Output modality of an extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Filename suffix appended to the segment base name
    pub fn file_suffix(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio.mp3",
            MediaKind::Video => "video.mp4",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Output paths computed for a single segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOutputPaths {
    pub audio: PathBuf,
    pub video: PathBuf,
}

impl SegmentOutputPaths {
    /// Get the path for a given modality
    pub fn for_kind(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }
}

/// Arguments handed to an extractor for one modality of one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub video_path: PathBuf,
    pub start: String,
    pub end: String,
    pub output_path: PathBuf,
}

impl ExtractionRequest {
    pub fn new(
        video_path: impl Into<PathBuf>,
        start: impl Into<String>,
        end: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            video_path: video_path.into(),
            start: start.into(),
            end: end.into(),
            output_path: output_path.into(),
        }
    }
}

/// Paths of successfully exported files, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    pub audio_segments: Vec<PathBuf>,
    pub video_segments: Vec<PathBuf>,
}

impl ExportResult {
    /// Create an empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record a successful extraction
    pub fn push(&mut self, kind: MediaKind, path: PathBuf) {
        match kind {
            MediaKind::Audio => self.audio_segments.push(path),
            MediaKind::Video => self.video_segments.push(path),
        }
    }

    /// Check whether nothing was exported
    pub fn is_empty(&self) -> bool {
        self.audio_segments.is_empty() && self.video_segments.is_empty()
    }

    /// Total number of exported files
    pub fn total_files(&self) -> usize {
        self.audio_segments.len() + self.video_segments.len()
    }
}

#[cfg(test)]
mod tests;
