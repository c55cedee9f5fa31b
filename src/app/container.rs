use std::sync::Arc;

use crate::adapters::{
    ExporterConfig, FFmpegAdapter, FFprobeAdapter, LocalFsAdapter, TracingLogAdapter,
    WhisperAdapter,
};
use crate::app::{export_interactor::SegmentExporter, job_interactor::JobInteractor};
use crate::ports::{ExtractPort, FsPort, LogPort, ProbePort, TranscribePort};

pub trait AppContainer: Send + Sync {
    fn segment_exporter(&self) -> Arc<SegmentExporter>;
    fn job_interactor(&self) -> Arc<JobInteractor>;
    fn probe_port(&self) -> Arc<dyn ProbePort>;
}

pub struct DefaultAppContainer {
    segment_exporter: Arc<SegmentExporter>,
    job_interactor: Arc<JobInteractor>,
    probe_port: Arc<dyn ProbePort>,
}

impl DefaultAppContainer {
    pub fn new(config: &ExporterConfig) -> Self {
        let extract_port: Arc<dyn ExtractPort> =
            Arc::new(FFmpegAdapter::new(config.ffmpeg.clone()));
        let probe_port: Arc<dyn ProbePort> =
            Arc::new(FFprobeAdapter::new(config.ffmpeg.ffprobe_path.clone()));
        let transcribe_port = WhisperAdapter::from_settings(&config.transcription)
            .map(|adapter| Arc::new(adapter) as Arc<dyn TranscribePort>);

        Self::with_ports(
            extract_port,
            transcribe_port,
            probe_port,
            Arc::new(LocalFsAdapter::new()),
            Arc::new(TracingLogAdapter::new()),
        )
    }

    /// Wire the interactors around explicit port implementations
    pub fn with_ports(
        extract_port: Arc<dyn ExtractPort>,
        transcribe_port: Option<Arc<dyn TranscribePort>>,
        probe_port: Arc<dyn ProbePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
    ) -> Self {
        let segment_exporter = Arc::new(SegmentExporter::new(
            Arc::clone(&extract_port),
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let job_interactor = Arc::new(JobInteractor::new(
            Arc::clone(&segment_exporter),
            extract_port,
            transcribe_port,
            Arc::clone(&probe_port),
            fs_port,
            log_port,
        ));

        Self {
            segment_exporter,
            job_interactor,
            probe_port,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn segment_exporter(&self) -> Arc<SegmentExporter> {
        Arc::clone(&self.segment_exporter)
    }

    fn job_interactor(&self) -> Arc<JobInteractor> {
        Arc::clone(&self.job_interactor)
    }

    fn probe_port(&self) -> Arc<dyn ProbePort> {
        Arc::clone(&self.probe_port)
    }
}
