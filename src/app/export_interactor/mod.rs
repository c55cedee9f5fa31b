// Export interactor - Orchestrates per-segment audio and video extraction

use std::path::Path;
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Exports audio and video files for a list of time ranges.
///
/// Segments are processed one at a time in input order, audio before video.
/// A segment or modality that fails is logged and left out of the result;
/// only a failure to create the output directory is returned as an error.
pub struct SegmentExporter {
    extract_port: Arc<dyn ExtractPort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl SegmentExporter {
    /// Create new exporter with injected ports
    pub fn new(
        extract_port: Arc<dyn ExtractPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        Self {
            extract_port,
            fs_port,
            log_port,
        }
    }

    /// Export every complete segment of `video_path` into `output_dir`.
    ///
    /// The source must be a regular file; a missing path or a directory is
    /// reported once and yields an empty result without creating `output_dir`.
    pub async fn export(
        &self,
        video_path: &Path,
        segments: &[SegmentSpec],
        output_dir: &Path,
    ) -> Result<ExportResult, DomainError> {
        if !self.source_exists(video_path).await {
            self.log_port
                .error(&format!(
                    "Video file not found at {}",
                    video_path.display()
                ))
                .await;
            return Ok(ExportResult::empty());
        }

        self.fs_port.create_directory(output_dir).await?;

        let mut result = ExportResult::empty();

        for (position, segment) in segments.iter().enumerate() {
            let index = position + 1;

            let Some((start, end)) = segment.bounds() else {
                self.log_port
                    .warn(&format!(
                        "Segment {} is missing start or end time. Skipping.",
                        index
                    ))
                    .await;
                continue;
            };

            let paths =
                SegmentNaming::segment_output_paths(video_path, output_dir, index, start, end);

            self.log_port
                .info(&format!("Exporting segment {}: {} - {}", index, start, end))
                .await;

            for kind in [MediaKind::Audio, MediaKind::Video] {
                let request =
                    ExtractionRequest::new(video_path, start, end, paths.for_kind(kind));
                if self.extract_one(kind, index, &request).await {
                    result.push(kind, request.output_path);
                }
            }
        }

        self.log_port
            .debug(&format!(
                "Export finished: {} audio, {} video file(s) from {} segment(s)",
                result.audio_segments.len(),
                result.video_segments.len(),
                segments.len()
            ))
            .await;

        Ok(result)
    }

    async fn source_exists(&self, video_path: &Path) -> bool {
        match self.fs_port.file_exists(video_path).await {
            Ok(exists) => exists,
            Err(e) => {
                self.log_port
                    .debug(&format!("Could not check {}: {}", video_path.display(), e))
                    .await;
                false
            }
        }
    }

    /// Run one extraction and corroborate it against the filesystem
    async fn extract_one(&self, kind: MediaKind, index: usize, request: &ExtractionRequest) -> bool {
        let outcome = self.extract_port.extract_segment(kind, request).await;

        let produced = match outcome {
            Ok(_) => matches!(self.fs_port.file_exists(&request.output_path).await, Ok(true)),
            Err(ref e) => {
                self.log_port
                    .debug(&format!("{} extractor error for segment {}: {}", kind, index, e))
                    .await;
                false
            }
        };

        if produced {
            self.log_port
                .info(&format!(
                    "Successfully exported {} segment to {}",
                    kind,
                    request.output_path.display()
                ))
                .await;
        } else {
            self.log_port
                .error(&format!(
                    "Failed to export {} segment {} for {}",
                    kind,
                    index,
                    request.video_path.display()
                ))
                .await;
        }

        produced
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::adapters::LocalFsAdapter;

    /// Extractor that writes placeholder files instead of running ffmpeg
    #[derive(Default)]
    pub struct FakeExtractor {
        pub failing: HashSet<MediaKind>,
        pub silent: HashSet<MediaKind>,
        pub calls: Mutex<Vec<(MediaKind, ExtractionRequest)>>,
    }

    impl FakeExtractor {
        pub fn failing(kind: MediaKind) -> Self {
            let mut fake = Self::default();
            fake.failing.insert(kind);
            fake
        }

        /// Reports success for `kind` without writing anything
        pub fn silent(kind: MediaKind) -> Self {
            let mut fake = Self::default();
            fake.silent.insert(kind);
            fake
        }

        pub fn calls(&self) -> Vec<(MediaKind, ExtractionRequest)> {
            self.calls.lock().unwrap().clone()
        }

        fn run(&self, kind: MediaKind, request: &ExtractionRequest) -> Result<PathBuf, DomainError> {
            self.calls.lock().unwrap().push((kind, request.clone()));
            if self.failing.contains(&kind) {
                return Err(DomainError::ProcessingError(format!("{} encoder exploded", kind)));
            }
            if !self.silent.contains(&kind) {
                std::fs::write(&request.output_path, kind.to_string())
                    .map_err(|e| DomainError::FsFail(e.to_string()))?;
            }
            Ok(request.output_path.clone())
        }
    }

    #[async_trait]
    impl ExtractPort for FakeExtractor {
        async fn extract_audio_segment(
            &self,
            request: &ExtractionRequest,
        ) -> Result<PathBuf, DomainError> {
            self.run(MediaKind::Audio, request)
        }

        async fn extract_video_segment(
            &self,
            request: &ExtractionRequest,
        ) -> Result<PathBuf, DomainError> {
            self.run(MediaKind::Video, request)
        }

        /// Counts as an audio extraction for `failing` and `silent`
        async fn extract_full_audio(
            &self,
            video_path: &Path,
            output_path: &Path,
        ) -> Result<PathBuf, DomainError> {
            let request = ExtractionRequest::new(video_path, "", "", output_path);
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| DomainError::FsFail(e.to_string()))?;
            }
            self.run(MediaKind::Audio, &request)
        }
    }

    /// Transcriber returning a fixed text, or failing when none is set
    pub struct FakeTranscriber {
        pub text: Option<String>,
        pub seen: Mutex<Vec<PathBuf>>,
    }

    impl FakeTranscriber {
        pub fn saying(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                text: None,
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn seen(&self) -> Vec<PathBuf> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TranscribePort for FakeTranscriber {
        async fn transcribe(&self, audio_path: &Path) -> Result<String, DomainError> {
            self.seen.lock().unwrap().push(audio_path.to_path_buf());
            if !audio_path.is_file() {
                return Err(DomainError::FileNotFound(audio_path.display().to_string()));
            }
            self.text
                .clone()
                .ok_or_else(|| DomainError::ProcessingError("Transcription API returned 500".to_string()))
        }
    }

    /// Log port that keeps every message for assertions
    #[derive(Default)]
    pub struct RecordingLog {
        pub entries: Mutex<Vec<(LogLevel, String)>>,
    }

    impl RecordingLog {
        pub fn messages(&self, level: LogLevel) -> Vec<String> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }

        fn record(&self, level: LogLevel, message: &str) {
            self.entries.lock().unwrap().push((level, message.to_string()));
        }
    }

    #[async_trait]
    impl LogPort for RecordingLog {
        async fn info(&self, message: &str) {
            self.record(LogLevel::Info, message);
        }

        async fn warn(&self, message: &str) {
            self.record(LogLevel::Warn, message);
        }

        async fn error(&self, message: &str) {
            self.record(LogLevel::Error, message);
        }

        async fn debug(&self, message: &str) {
            self.record(LogLevel::Debug, message);
        }
    }

    pub fn exporter(extractor: Arc<FakeExtractor>, log: Arc<RecordingLog>) -> SegmentExporter {
        SegmentExporter::new(extractor, Arc::new(LocalFsAdapter::new()), log)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::test_support::*;
    use super::*;

    fn source_video(dir: &Path) -> PathBuf {
        let path = dir.join("clip.mp4");
        std::fs::write(&path, b"not really a video").unwrap();
        path
    }

    #[tokio::test]
    async fn test_single_segment_exports_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let video = source_video(dir.path());
        let out = dir.path().join("out");
        let extractor = Arc::new(FakeExtractor::default());
        let log = Arc::new(RecordingLog::default());

        let result = exporter(extractor.clone(), log.clone())
            .export(&video, &[SegmentSpec::new("00:00:10", "00:00:20")], &out)
            .await
            .unwrap();

        assert_eq!(
            result.audio_segments,
            vec![out.join("clip_segment_1_00-00-10_00-00-20_audio.mp3")]
        );
        assert_eq!(
            result.video_segments,
            vec![out.join("clip_segment_1_00-00-10_00-00-20_video.mp4")]
        );
        assert!(result.audio_segments[0].is_file());
        assert!(result.video_segments[0].is_file());

        let calls = extractor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, MediaKind::Audio);
        assert_eq!(calls[1].0, MediaKind::Video);
        assert_eq!(calls[0].1.start, "00:00:10");
        assert_eq!(calls[0].1.end, "00:00:20");
        assert_eq!(calls[0].1.video_path, video);
    }

    #[tokio::test]
    async fn test_missing_video_returns_empty_without_creating_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let extractor = Arc::new(FakeExtractor::default());
        let log = Arc::new(RecordingLog::default());

        let result = exporter(extractor.clone(), log.clone())
            .export(
                &dir.path().join("missing.mp4"),
                &[SegmentSpec::new("00:00:00", "00:00:05")],
                &out,
            )
            .await
            .unwrap();

        assert!(result.is_empty());
        assert!(!out.exists());
        assert!(extractor.calls().is_empty());
        let errors = log.messages(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("missing.mp4"));
    }

    #[tokio::test]
    async fn test_directory_source_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("recordings");
        std::fs::create_dir(&source).unwrap();
        let out = dir.path().join("out");
        let extractor = Arc::new(FakeExtractor::default());
        let log = Arc::new(RecordingLog::default());

        let result = exporter(extractor.clone(), log.clone())
            .export(&source, &[SegmentSpec::new("00:00:00", "00:00:05")], &out)
            .await
            .unwrap();

        assert!(result.is_empty());
        assert!(!out.exists());
        assert!(extractor.calls().is_empty());
        assert_eq!(log.messages(LogLevel::Error).len(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_segment_is_skipped_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let video = source_video(dir.path());
        let out = dir.path().join("out");
        let extractor = Arc::new(FakeExtractor::default());
        let log = Arc::new(RecordingLog::default());

        let segments = vec![
            SegmentSpec::new("00:00:00", "00:00:05"),
            SegmentSpec::start_only("00:00:10"),
        ];
        let result = exporter(extractor.clone(), log.clone())
            .export(&video, &segments, &out)
            .await
            .unwrap();

        assert_eq!(
            result.audio_segments,
            vec![out.join("clip_segment_1_00-00-00_00-00-05_audio.mp3")]
        );
        assert_eq!(result.video_segments.len(), 1);
        assert_eq!(extractor.calls().len(), 2);

        let warnings = log.messages(LogLevel::Warn);
        assert_eq!(warnings, vec!["Segment 2 is missing start or end time. Skipping."]);
    }

    #[tokio::test]
    async fn test_indices_follow_input_positions() {
        let dir = tempfile::tempdir().unwrap();
        let video = source_video(dir.path());
        let out = dir.path().join("out");
        let extractor = Arc::new(FakeExtractor::default());
        let log = Arc::new(RecordingLog::default());

        let segments = vec![
            SegmentSpec::default(),
            SegmentSpec::new("00:01:00", "00:01:30"),
        ];
        let result = exporter(extractor, log)
            .export(&video, &segments, &out)
            .await
            .unwrap();

        assert_eq!(
            result.video_segments,
            vec![out.join("clip_segment_2_00-01-00_00-01-30_video.mp4")]
        );
    }

    #[tokio::test]
    async fn test_audio_failure_does_not_block_video() {
        let dir = tempfile::tempdir().unwrap();
        let video = source_video(dir.path());
        let out = dir.path().join("out");
        let extractor = Arc::new(FakeExtractor::failing(MediaKind::Audio));
        let log = Arc::new(RecordingLog::default());

        let result = exporter(extractor.clone(), log.clone())
            .export(&video, &[SegmentSpec::new("00:00:10", "00:00:20")], &out)
            .await
            .unwrap();

        assert!(result.audio_segments.is_empty());
        assert_eq!(result.video_segments.len(), 1);
        assert_eq!(extractor.calls().len(), 2);
        assert!(log
            .messages(LogLevel::Error)
            .iter()
            .any(|m| m.starts_with("Failed to export audio segment 1")));
    }

    #[tokio::test]
    async fn test_reported_success_without_file_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let video = source_video(dir.path());
        let out = dir.path().join("out");
        let extractor = Arc::new(FakeExtractor::silent(MediaKind::Video));
        let log = Arc::new(RecordingLog::default());

        let result = exporter(extractor, log.clone())
            .export(&video, &[SegmentSpec::new("00:00:10", "00:00:20")], &out)
            .await
            .unwrap();

        assert_eq!(result.audio_segments.len(), 1);
        assert!(result.video_segments.is_empty());
        assert!(log
            .messages(LogLevel::Error)
            .iter()
            .any(|m| m.starts_with("Failed to export video segment 1")));
    }

    #[tokio::test]
    async fn test_repeated_export_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let video = source_video(dir.path());
        let out = dir.path().join("out");
        let segments = vec![
            SegmentSpec::new("00:00:00", "00:00:05"),
            SegmentSpec::new("00:00:05", "00:00:10"),
        ];

        let first = exporter(Arc::new(FakeExtractor::default()), Arc::new(RecordingLog::default()))
            .export(&video, &segments, &out)
            .await
            .unwrap();
        let second = exporter(Arc::new(FakeExtractor::default()), Arc::new(RecordingLog::default()))
            .export(&video, &segments, &out)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 4);
    }

    #[tokio::test]
    async fn test_empty_segment_list_still_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let video = source_video(dir.path());
        let out = dir.path().join("out");

        let result = exporter(Arc::new(FakeExtractor::default()), Arc::new(RecordingLog::default()))
            .export(&video, &[], &out)
            .await
            .unwrap();

        assert!(result.is_empty());
        assert!(out.is_dir());
    }
}
