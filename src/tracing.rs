//! Tracing Setup
//!
//! Opt-in logging initialization built on `tracing-subscriber`.
//! Applications that install their own subscriber can ignore this module;
//! the library only emits events and never initializes logging on its own.

use tracing_subscriber::EnvFilter;

use crate::error::TutorError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line human-readable output
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Subscriber configuration with environment override.
///
/// `RUST_LOG` always wins over `level` when set, so operators can raise
/// verbosity without touching code.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,
    /// Output format
    pub format: OutputFormat,
    /// Include event targets in output
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl TracingConfig {
    /// Verbose multi-line output for local development.
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: OutputFormat::Pretty,
            with_target: true,
        }
    }

    /// Warnings and errors only, single-line.
    pub fn minimal() -> Self {
        Self {
            level: "warn".to_string(),
            format: OutputFormat::Compact,
            with_target: false,
        }
    }

    /// JSON lines at info level for log collectors.
    pub fn json_production() -> Self {
        Self {
            level: "info".to_string(),
            format: OutputFormat::Json,
            with_target: true,
        }
    }
}

/// Installs a global subscriber built from `config`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: TracingConfig) -> Result<(), TutorError> {
    let make_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format {
        OutputFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(make_filter())
            .with_target(config.with_target)
            .pretty()
            .try_init(),
        OutputFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(make_filter())
            .with_target(config.with_target)
            .compact()
            .try_init(),
        OutputFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(make_filter())
            .with_target(config.with_target)
            .json()
            .try_init(),
    };

    result.map_err(|e| TutorError::InternalError(format!("Failed to initialize tracing: {e}")))
}

/// Installs the development subscriber.
pub fn init_default_tracing() -> Result<(), TutorError> {
    init_tracing(TracingConfig::default())
}
