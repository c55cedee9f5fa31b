//! Error handling module for segex

use thiserror::Error;

/// Main error type for segex operations
#[derive(Error, Debug)]
pub enum ExporterError {
    /// Configuration file could not be parsed or failed validation
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for segex operations
pub type ExporterResult<T> = std::result::Result<T, ExporterError>;
