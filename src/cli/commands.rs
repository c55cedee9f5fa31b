//! Command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use crate::app::{AppContainer, JobRequest, JobSummary};
use crate::cli::args::{ExportArgs, InspectArgs, JobArgs};
use crate::domain::model::{ExportResult, SegmentSpec};

/// Execute the export command
pub async fn export(args: ExportArgs, container: &dyn AppContainer) -> Result<()> {
    info!("Starting export operation");
    info!("Input: {}", args.input.display());
    info!("Output directory: {}", args.output_dir.display());

    let segments = collect_segments(&args)?;
    info!("Segments requested: {}", segments.len());

    let result = container
        .segment_exporter()
        .export(&args.input, &segments, &args.output_dir)
        .await
        .context("Failed to export segments")?;

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize export result to JSON")?;
        println!("{}", json);
    } else {
        display_export_result(&result);
    }

    info!("Export operation completed");
    Ok(())
}

/// Execute the job command
pub async fn job(args: JobArgs, container: &dyn AppContainer) -> Result<()> {
    info!("Starting job from {}", args.job.display());

    let mut request = JobRequest::from_file(&args.job)
        .with_context(|| format!("Failed to load job file {}", args.job.display()))?;
    if args.no_transcribe {
        request.skip_transcription = true;
    }

    let summary = container
        .job_interactor()
        .process_job(&request)
        .await
        .context("Failed to process job")?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize job summary to JSON")?;
        println!("{}", json);
    } else {
        display_job_summary(&summary);
    }

    match &summary.error {
        None => {
            info!("Job completed successfully");
            Ok(())
        }
        Some(message) => {
            error!("Job finished with an error: {}", message);
            Err(anyhow::anyhow!("Job failed: {}", message))
        }
    }
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs, container: &dyn AppContainer) -> Result<()> {
    info!("Starting inspect operation");
    info!("Input: {}", args.input.display());

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }

    let duration = container
        .probe_port()
        .probe_duration(&args.input)
        .await
        .context("Failed to inspect input file")?;

    if args.json {
        let json = serde_json::json!({
            "file": args.input,
            "duration_seconds": duration,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("File: {}", args.input.display());
        println!("Duration: {:.3}s", duration);
    }

    Ok(())
}

/// Merge segments from `--segments-file` and repeated `--segment` flags,
/// file entries first
pub fn collect_segments(args: &ExportArgs) -> Result<Vec<SegmentSpec>> {
    let mut segments = match &args.segments_file {
        Some(path) => read_segments_file(path)?,
        None => Vec::new(),
    };

    segments.extend(
        args.segments
            .chunks(2)
            .map(|pair| SegmentSpec::new(pair[0].clone(), pair.get(1).cloned().unwrap_or_default())),
    );

    if segments.is_empty() {
        bail!("No segments given; use --segment START END or --segments-file");
    }

    Ok(segments)
}

fn read_segments_file(path: &Path) -> Result<Vec<SegmentSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read segments file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid segments file {}", path.display()))
}

/// Display export result in human-readable format
fn display_export_result(result: &ExportResult) {
    println!("Export Results");
    println!("==============");
    println!(
        "Exported {} file(s): {} audio, {} video",
        result.total_files(),
        result.audio_segments.len(),
        result.video_segments.len()
    );

    if !result.audio_segments.is_empty() {
        println!();
        println!("Audio Segments:");
        for path in &result.audio_segments {
            println!("  {}", path.display());
        }
    }

    if !result.video_segments.is_empty() {
        println!();
        println!("Video Segments:");
        for path in &result.video_segments {
            println!("  {}", path.display());
        }
    }
}

/// Display job summary in human-readable format
fn display_job_summary(summary: &JobSummary) {
    println!("Job Summary");
    println!("===========");
    println!("Video: {}", summary.video_path_processed);
    if let Some(dir) = &summary.job_output_directory {
        println!("Output Directory: {}", dir.display());
    }
    if let Some(duration) = summary.source_duration_seconds {
        println!("Source Duration: {:.3}s", duration);
    }
    match (&summary.transcript_file, &summary.transcript_content) {
        (Some(path), _) => println!("Transcript: {}", path.display()),
        (None, Some(_)) => println!("Transcript: not saved"),
        (None, None) => println!("Transcript: none"),
    }
    println!(
        "Exported: {} audio, {} video",
        summary.exported_audio_segments.len(),
        summary.exported_video_segments.len()
    );
    if let Some(path) = &summary.job_status_file {
        println!("Summary File: {}", path.display());
    }
    println!("Status: {}", if summary.is_success() { "✓" } else { "✗" });
    if let Some(message) = &summary.error {
        println!("Error: {}", message);
    }
}
