//! segex - Segment Exporter CLI
//!
//! Cuts a list of time ranges out of a video file with ffmpeg, producing one
//! MP3 and one MP4 file per range.
//!
//! # Usage
//!
//! ```bash
//! segex export --input clip.mp4 --output-dir out --segment 00:00:10 00:00:20
//! segex job --job job.json
//! segex inspect --input clip.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use segex::adapters::tracing_log::init_subscriber;
use segex::app::DefaultAppContainer;
use segex::cli::{commands, Cli, Commands};
use segex::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the segex CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let loaded = initialize_configuration_hierarchy(&cli)?;

    // Initialize logging
    init_subscriber(loaded.config.log_level(), loaded.config.logging.json);

    info!("Starting segex");
    match &loaded.source_file {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }
    if loaded.env_overrides > 0 || loaded.cli_overrides > 0 {
        info!(
            "Applied {} environment and {} CLI configuration overrides",
            loaded.env_overrides, loaded.cli_overrides
        );
    }

    if loaded.config.transcription.api_key.is_none() {
        info!("OPENAI_API_KEY not set; job transcripts are unavailable");
    }

    let container = DefaultAppContainer::new(&loaded.config);

    // Execute the requested command
    match cli.command {
        Commands::Export(args) => {
            info!("Executing export command");
            commands::export(args, &container).await?;
        }
        Commands::Job(args) => {
            info!("Executing job command");
            commands::job(args, &container).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(args, &container).await?;
        }
    }

    info!("segex completed successfully");
    Ok(())
}
