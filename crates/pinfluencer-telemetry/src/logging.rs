//! Structured logging.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and a
//! JSON (deployed) or pretty (local) formatting layer. Every crate of the
//! backend logs through the `tracing` macros; this module only decides where
//! the events go.
//!
//! # Example
//!
//! ```rust,ignore
//! use pinfluencer_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default())?;
//! tracing::info!(route = "GET /brands", status = 200, "request dispatched");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether a subscriber is installed at all.
    pub enabled: bool,

    /// `EnvFilter` directive, e.g. `info` or `pinfluencer_server=debug,info`.
    pub level: String,

    /// Output format.
    pub format: LogFormat,

    /// Whether to include file and line.
    pub file_line_info: bool,

    /// Whether to include the module path.
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: LogFormat::Json,
            file_line_info: false,
            include_target: true,
        }
    }
}

impl LogConfig {
    /// Pretty debug output with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            file_line_info: true,
            ..Self::default()
        }
    }
}

/// Installs the global log subscriber.
///
/// Does nothing when `config.enabled` is false.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidLevel` for a malformed directive and
/// `TelemetryError::LoggingInit` when a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    match config.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_file(config.file_line_info)
                .with_line_number(config.file_line_info)
                .with_target(config.include_target)
                .with_filter(filter);

            tracing_subscriber::registry()
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_file(config.file_line_info)
                .with_line_number(config.file_line_info)
                .with_target(config.include_target)
                .with_filter(filter);

            tracing_subscriber::registry()
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
        }
    }
}

/// Parses an `EnvFilter` directive.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidLevel` if the directive is malformed.
pub fn create_env_filter(level: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| TelemetryError::InvalidLevel {
        level: level.to_string(),
        reason: e.to_string(),
    })
}

/// Field names shared by the dispatch logs.
pub mod fields {
    /// Per-request id.
    pub const REQUEST_ID: &str = "request_id";

    /// Gateway route key.
    pub const ROUTE: &str = "route";

    /// Sequence bound to the route.
    pub const SEQUENCE: &str = "sequence";

    /// Response status code.
    pub const STATUS: &str = "status";

    /// Authenticated user.
    pub const AUTH_USER_ID: &str = "auth_user_id";
}
