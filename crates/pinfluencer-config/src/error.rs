//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration could not be produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested file is absent.
    #[error("no configuration file at {path}")]
    FileNotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("cannot read configuration file {path}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or an unknown key in a TOML source.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON or an unknown key in a JSON source.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A file extension or format name other than `toml`/`json`.
    #[error("configuration format `{0}` is not supported, use toml or json")]
    UnsupportedFormat(String),

    /// A value that parsed but breaks a rule, e.g. a non-URL bucket.
    #[error("{field}: {reason}")]
    InvalidValue {
        /// Dotted path, e.g. `images.bucket_url`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `PINFLUENCER__*` variable that names no key or holds a bad value.
    #[error("environment override {var}: {reason}")]
    EnvOverride {
        /// Variable name.
        var: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A `.env` file exists but could not be loaded.
    #[error("cannot load .env file: {0}")]
    Dotenv(String),
}

impl ConfigError {
    pub(crate) fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn env_override(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvOverride {
            var: var.into(),
            reason: reason.into(),
        }
    }
}
