//! segex - Segment Exporter Library
//!
//! Exports time-bounded audio (MP3) and video (MP4) segments from a source
//! video by running ffmpeg once per segment and modality, and reports which
//! files were actually produced. Jobs add a Whisper transcript of the source
//! and a JSON summary of the run.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use app::{DefaultAppContainer, JobInteractor, JobRequest, JobSummary, SegmentExporter};
pub use domain::errors::DomainError;
pub use domain::model::{ExportResult, ExtractionRequest, MediaKind, SegmentSpec};
pub use error::{ExporterError, ExporterResult};
