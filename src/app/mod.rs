// Application layer - Use case interactors

pub mod container;
pub mod export_interactor;
pub mod job_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use export_interactor::SegmentExporter;
pub use job_interactor::{JobInteractor, JobRequest, JobSummary};
