//! Logging for the Pinfluencer backend.
//!
//! Library crates only emit `tracing` events; the binary calls
//! [`init_logging`] once at cold start to decide where they go.
//!
//! ```
//! use pinfluencer_telemetry::{init_logging, LogConfig, LogFormat};
//!
//! let config = LogConfig {
//!     enabled: false,
//!     ..LogConfig::default()
//! };
//! init_logging(&config).unwrap();
//! assert_eq!(config.format, LogFormat::Json);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig, LogFormat};

/// Result alias for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
