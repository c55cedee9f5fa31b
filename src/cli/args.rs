//! Command-line argument definitions

use std::path::PathBuf;

use clap::{ArgAction, Args};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory receiving the exported files
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Time range to export, e.g. `--segment 00:00:10 00:00:20` (repeatable)
    #[arg(
        short,
        long = "segment",
        num_args = 2,
        value_names = ["START", "END"],
        action = ArgAction::Append
    )]
    pub segments: Vec<String>,

    /// JSON file holding an array of {"start", "end"} objects
    #[arg(long)]
    pub segments_file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the job command
#[derive(Args, Debug)]
pub struct JobArgs {
    /// Job description file (JSON)
    #[arg(short, long)]
    pub job: PathBuf,

    /// Export segments without producing a transcript
    #[arg(long)]
    pub no_transcribe: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
