// Tracing log adapter - Structured logging using tracing crate

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::ports::*;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Events go to stderr so that
/// stdout stays usable for JSON results. Calling this twice is harmless.
pub fn init_subscriber(level: LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let _ = if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    };
}

/// Tracing log adapter
pub struct TracingLogAdapter {
    target: &'static str,
}

impl TracingLogAdapter {
    /// Create new tracing log adapter
    pub fn new() -> Self {
        Self { target: "segex" }
    }
}

impl Default for TracingLogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        info!(component = self.target, "{}", message);
    }

    async fn warn(&self, message: &str) {
        warn!(component = self.target, "{}", message);
    }

    async fn error(&self, message: &str) {
        error!(component = self.target, "{}", message);
    }

    async fn debug(&self, message: &str) {
        debug!(component = self.target, "{}", message);
    }
}
