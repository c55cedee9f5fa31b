// Domain rules - Naming and layout policies

use std::path::{Path, PathBuf};

use crate::domain::model::*;

/// Stem used when the source path has no file name
const FALLBACK_STEM: &str = "video";

/// Rules for naming exported segment files
pub struct SegmentNaming;

impl SegmentNaming {
    /// Replace filesystem-unsafe colons in a timestamp with dashes
    pub fn safe_timestamp_token(timestamp: &str) -> String {
        timestamp.replace(':', "-")
    }

    /// File stem of the source video
    pub fn source_stem(video_path: &Path) -> String {
        video_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| FALLBACK_STEM.to_string())
    }

    /// Shared base name for both outputs of a segment (index is 1-based)
    pub fn segment_base_name(stem: &str, index: usize, start: &str, end: &str) -> String {
        format!(
            "{}_segment_{}_{}_{}",
            stem,
            index,
            Self::safe_timestamp_token(start),
            Self::safe_timestamp_token(end)
        )
    }

    /// Output file name for one modality
    pub fn output_file_name(base_name: &str, kind: MediaKind) -> String {
        format!("{}_{}", base_name, kind.file_suffix())
    }

    /// Compute audio and video output paths for a segment
    pub fn segment_output_paths(
        video_path: &Path,
        output_dir: &Path,
        index: usize,
        start: &str,
        end: &str,
    ) -> SegmentOutputPaths {
        let stem = Self::source_stem(video_path);
        let base = Self::segment_base_name(&stem, index, start, end);

        SegmentOutputPaths {
            audio: output_dir.join(Self::output_file_name(&base, MediaKind::Audio)),
            video: output_dir.join(Self::output_file_name(&base, MediaKind::Video)),
        }
    }
}

/// Directory layout of a job run
pub struct JobLayout;

impl JobLayout {
    pub const DEFAULT_OUTPUTS_ROOT: &'static str = "outputs";
    pub const SEGMENTS_SUBDIR: &'static str = "segments";
    pub const SUMMARY_FILE_NAME: &'static str = "job_summary.json";
    pub const TRANSCRIPT_FILE_NAME: &'static str = "transcript.txt";
    pub const TEMP_AUDIO_SUBDIR: &'static str = "temp_audio";

    /// Output directory used when a job does not name one
    pub fn default_output_dir(video_path: &Path) -> PathBuf {
        PathBuf::from(Self::DEFAULT_OUTPUTS_ROOT).join(format!(
            "{}_job_output",
            SegmentNaming::source_stem(video_path)
        ))
    }

    /// Directory receiving the exported segment files
    pub fn segments_dir(job_output_dir: &Path) -> PathBuf {
        job_output_dir.join(Self::SEGMENTS_SUBDIR)
    }

    /// Location of the JSON job summary
    pub fn summary_path(job_output_dir: &Path) -> PathBuf {
        job_output_dir.join(Self::SUMMARY_FILE_NAME)
    }

    pub fn transcript_path(job_output_dir: &Path) -> PathBuf {
        job_output_dir.join(Self::TRANSCRIPT_FILE_NAME)
    }

    /// Scratch directory for the transcription input; removed once empty
    pub fn temp_audio_dir(job_output_dir: &Path) -> PathBuf {
        job_output_dir.join(Self::TEMP_AUDIO_SUBDIR)
    }

    /// Full-length WAV handed to the transcriber
    pub fn transcription_audio_path(job_output_dir: &Path, video_path: &Path) -> PathBuf {
        Self::temp_audio_dir(job_output_dir).join(format!(
            "{}_whisper_input.wav",
            SegmentNaming::source_stem(video_path)
        ))
    }
}
