//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::env;
use std::fs;
use std::path::Path;

use pinfluencer_telemetry::LogFormat;

use crate::{ConfigError, PinfluencerConfig};

/// Environment prefix used by the deployed backend.
pub const ENV_PREFIX: &str = "PINFLUENCER";

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables (`PREFIX__SECTION__KEY`)
///
/// # Example
///
/// ```no_run
/// use pinfluencer_config::ConfigLoader;
///
/// # fn main() -> Result<(), pinfluencer_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_dotenv()?
///     .with_optional_file("pinfluencer.toml")?
///     .with_env_prefix("PINFLUENCER")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: PinfluencerConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader starting from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: PinfluencerConfig::default(),
            env_prefix: None,
        }
    }

    /// Start from the development preset.
    ///
    /// ```
    /// use pinfluencer_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = PinfluencerConfig::development();
        self
    }

    /// Start from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = PinfluencerConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`. Sections the
    /// file leaves out take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML/JSON or unknown fields
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        self.config = parse(&content, &format)?;

        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in `format` (`toml` or `json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails.
    ///
    /// ```
    /// use pinfluencer_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [images]
    ///     bucket_url = "https://cdn.example.com"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.images.bucket_url, "https://cdn.example.com");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, &format.to_lowercase())?;
        Ok(self)
    }

    /// Set the environment variable prefix for overrides.
    ///
    /// With prefix `PINFLUENCER`:
    /// - `PINFLUENCER__IMAGES__BUCKET_URL=https://cdn.example.com`
    /// - `PINFLUENCER__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file from the working directory into the environment.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if the file exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(err) if err.not_found() => Ok(self),
            Err(err) => Err(ConfigError::Dotenv(err.to_string())),
        }
    }

    /// Finalize: apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be parsed or the result
    /// is invalid.
    pub fn load(mut self) -> Result<PinfluencerConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            apply_env_overrides(&mut self.config, &prefix, env::vars())?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Finalize without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> PinfluencerConfig {
        self.config
    }
}

fn parse(content: &str, format: &str) -> Result<PinfluencerConfig, ConfigError> {
    match format {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn apply_env_overrides(
    config: &mut PinfluencerConfig,
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<(), ConfigError> {
    let section_prefix = format!("{prefix}__");
    for (key, value) in vars {
        if let Some(path) = key.strip_prefix(&section_prefix) {
            apply_env_var(config, &key, path, &value)?;
        }
    }
    Ok(())
}

fn apply_env_var(
    config: &mut PinfluencerConfig,
    key: &str,
    path: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let parts: Vec<&str> = path.split("__").collect();

    match parts.as_slice() {
        ["IMAGES", "BUCKET_URL"] => {
            config.images.bucket_url = value.to_string();
        }

        ["LOGGING", "ENABLED"] => {
            config.logging.enabled =
                parse_bool(value).ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
        }
        ["LOGGING", "LEVEL"] => {
            config.logging.level = value.to_string();
        }
        ["LOGGING", "FORMAT"] => {
            config.logging.format = match value.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => return Err(ConfigError::env_override(key, "expected 'json' or 'pretty'")),
            };
        }

        ["SERVICE", "NAME"] => {
            config.service.name = value.to_string();
        }
        ["SERVICE", "ENVIRONMENT"] => {
            config.service.environment = value.to_string();
        }

        _ => return Err(ConfigError::env_override(key, "unknown configuration key")),
    }

    Ok(())
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
