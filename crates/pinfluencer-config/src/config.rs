//! The root configuration type.

use pinfluencer_telemetry::{create_env_filter, LogFormat};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ImagesConfig, LoggingConfig, ServiceConfig};

/// Complete backend configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// ```
/// use pinfluencer_config::{PinfluencerConfig, DEFAULT_BUCKET_URL};
///
/// let config = PinfluencerConfig::default();
/// assert_eq!(config.images.bucket_url, DEFAULT_BUCKET_URL);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct PinfluencerConfig {
    /// Image storage.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Service identity.
    #[serde(default)]
    pub service: ServiceConfig,
}

impl PinfluencerConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - the bucket URL is not an http(s) URL
    /// - the log level is not a valid filter directive
    /// - the service name is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bucket_url = &self.images.bucket_url;
        if !(bucket_url.starts_with("https://") || bucket_url.starts_with("http://")) {
            return Err(ConfigError::invalid_value(
                "images.bucket_url",
                format!("expected an http(s) URL, got `{bucket_url}`"),
            ));
        }

        if self.logging.enabled {
            create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        if self.service.name.trim().is_empty() {
            return Err(ConfigError::invalid_value("service.name", "must not be empty"));
        }

        Ok(())
    }

    /// Local development preset: pretty debug logs.
    ///
    /// ```
    /// use pinfluencer_config::PinfluencerConfig;
    ///
    /// let config = PinfluencerConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.service.environment = "development".to_string();
        config
    }

    /// Deployed preset: JSON info logs.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.service.environment = "production".to_string();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PinfluencerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.service.name, "pinfluencer-backend");
    }

    #[test]
    fn test_presets() {
        assert_eq!(PinfluencerConfig::development().logging.format, LogFormat::Pretty);
        let production = PinfluencerConfig::production();
        assert_eq!(production.logging.format, LogFormat::Json);
        assert_eq!(production.service.environment, "production");
    }

    #[test]
    fn test_invalid_bucket_url() {
        let mut config = PinfluencerConfig::default();
        config.images.bucket_url = "s3://bucket".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "images.bucket_url"
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = PinfluencerConfig::default();
        config.logging.level = "pinfluencer=loud".to_string();
        assert!(config.validate().is_err());

        config.logging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_service_name() {
        let mut config = PinfluencerConfig::default();
        config.service.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<PinfluencerConfig, _> = toml::from_str("[server]\nport = 80\n");
        assert!(result.is_err());
    }
}
