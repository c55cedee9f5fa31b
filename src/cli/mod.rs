//! CLI module for segex
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{ExportArgs, InspectArgs, JobArgs};

/// segex - export timestamped audio and video segments
///
/// Each requested range is cut twice by ffmpeg: once to an MP3 audio file and
/// once to an MP4 video file.
#[derive(Parser, Debug)]
#[command(name = "segex")]
#[command(about = "Export audio and video segments from a video file")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "SEGEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, global = true)]
    pub ffmpeg_path: Option<String>,

    /// ffprobe executable
    #[arg(long, global = true)]
    pub ffprobe_path: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export audio and video files for a list of time ranges
    Export(args::ExportArgs),
    /// Run a job described by a JSON file and write a job summary
    Job(args::JobArgs),
    /// Show the duration of a media file
    Inspect(args::InspectArgs),
}
