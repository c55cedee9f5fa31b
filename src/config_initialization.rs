//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use crate::adapters::toml_config::{ExporterConfig, TomlConfigAdapter, DEFAULT_CONFIG_PATHS};
use crate::cli::Cli;
use crate::error::ExporterResult;

/// Resolved configuration plus where its values came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ExporterConfig,
    pub source_file: Option<PathBuf>,
    pub env_overrides: usize,
    pub cli_overrides: usize,
}

/// Build configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> ExporterResult<LoadedConfig> {
    initialize_with_env(cli, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration_hierarchy`] with an injectable environment
pub fn initialize_with_env<F>(cli: &Cli, env_lookup: F) -> ExporterResult<LoadedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut adapter = TomlConfigAdapter::new();

    match &cli.config {
        Some(path) => adapter.load_file(path)?,
        None => {
            adapter.load_first_existing(DEFAULT_CONFIG_PATHS)?;
        }
    }

    let env_overrides = adapter.apply_env_overrides(env_lookup);
    let cli_overrides = apply_cli_configuration_overrides(adapter.config_mut(), cli);

    adapter.config().validate()?;

    let source_file = adapter.config_file_path().map(|p| p.to_path_buf());
    Ok(LoadedConfig {
        config: adapter.into_config(),
        source_file,
        env_overrides,
        cli_overrides,
    })
}

/// Apply CLI argument overrides to configuration
fn apply_cli_configuration_overrides(config: &mut ExporterConfig, cli: &Cli) -> usize {
    let mut cli_overrides = 0;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        cli_overrides += 1;
    }
    if cli.log_json {
        config.logging.json = true;
        cli_overrides += 1;
    }
    if let Some(path) = &cli.ffmpeg_path {
        config.ffmpeg.ffmpeg_path = path.clone();
        cli_overrides += 1;
    }
    if let Some(path) = &cli.ffprobe_path {
        config.ffmpeg.ffprobe_path = path.clone();
        cli_overrides += 1;
    }

    cli_overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::ports::LogLevel;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        std::fs::write(
            &file,
            "[ffmpeg]\nffmpeg_path = \"from-file\"\nffprobe_path = \"probe-from-file\"\naudio_bitrate = \"96k\"\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();
        let file_arg = file.to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "segex", "--config", &file_arg, "--ffmpeg-path", "from-cli",
            "inspect", "-i", "clip.mp4",
        ])
        .unwrap();

        let loaded = initialize_with_env(&cli, |key| match key {
            "SEGEX_FFMPEG_PATH" => Some("from-env".to_string()),
            "SEGEX_FFPROBE_PATH" => Some("probe-from-env".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(loaded.config.ffmpeg.ffmpeg_path, "from-cli");
        assert_eq!(loaded.config.ffmpeg.ffprobe_path, "probe-from-env");
        assert_eq!(loaded.config.ffmpeg.audio_bitrate, "96k");
        assert_eq!(loaded.config.log_level(), LogLevel::Warn);
        assert_eq!(loaded.source_file, Some(file));
        assert_eq!(loaded.env_overrides, 2);
        assert_eq!(loaded.cli_overrides, 1);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let cli = Cli::try_parse_from([
            "segex", "--config", "/no/such/segex.toml", "inspect", "-i", "clip.mp4",
        ])
        .unwrap();
        assert!(initialize_with_env(&cli, no_env).is_err());
    }

    #[test]
    fn test_invalid_cli_log_level_is_rejected() {
        let cli = Cli::try_parse_from([
            "segex", "--log-level", "shouty", "inspect", "-i", "clip.mp4",
        ])
        .unwrap();
        assert!(initialize_with_env(&cli, no_env).is_err());
    }
}
