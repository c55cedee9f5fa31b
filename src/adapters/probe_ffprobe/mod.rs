//! FFprobe adapter for media file probing
//!
//! This module reads the container duration reported by `ffprobe`.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe_path: String,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Extract `format.duration` from ffprobe JSON output
    pub fn parse_duration(json: &str) -> Result<f64, DomainError> {
        let parsed: ProbeOutput = serde_json::from_str(json)
            .map_err(|e| DomainError::ProbeError(format!("Unexpected ffprobe output: {}", e)))?;

        let raw = parsed
            .format
            .duration
            .ok_or_else(|| DomainError::ProbeError("No duration reported".to_string()))?;

        raw.trim()
            .parse::<f64>()
            .map_err(|_| DomainError::ProbeError(format!("Invalid duration: {}", raw)))
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        debug!("Probing duration of {}", file_path.display());

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_format"])
            .arg(file_path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::ProbeError(format!("Failed to launch {}: {}", self.ffprobe_path, e))
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeError(format!(
                "ffprobe failed on {}: {}",
                file_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::parse_duration(&String::from_utf8_lossy(&output.stdout))
    }
}
