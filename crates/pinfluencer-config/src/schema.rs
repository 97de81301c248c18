//! Configuration sections.
//!
//! Every section rejects unknown fields and fills absent ones with the
//! defaults below.

use pinfluencer_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

/// Public URL of the image bucket used when none is configured.
pub const DEFAULT_BUCKET_URL: &str = "https://pinfluencer-product-images.s3.eu-west-2.amazonaws.com";

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bucket_url() -> String {
    DEFAULT_BUCKET_URL.to_string()
}

fn default_service_name() -> String {
    "pinfluencer-backend".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

/// `[images]`: object storage of uploaded images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    /// Public URL prefixed to stored image keys in responses.
    #[serde(default = "default_bucket_url")]
    pub bucket_url: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            bucket_url: default_bucket_url(),
        }
    }
}

/// `[logging]`: the log subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Install a subscriber at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// `EnvFilter` directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// The subscriber settings for this section.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            file_line_info: self.format == LogFormat::Pretty,
            ..LogConfig::default()
        }
    }
}

/// `[service]`: identity of the deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Service name reported in logs.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Deployment stage, e.g. `development` or `production`.
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            environment: default_environment(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_defaults() {
        assert_eq!(ImagesConfig::default().bucket_url, DEFAULT_BUCKET_URL);
        assert!(LoggingConfig::default().enabled);
        assert_eq!(ServiceConfig::default().environment, "development");
    }

    #[test]
    fn test_partial_section_filled_with_defaults() {
        let logging: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(logging.format, LogFormat::Pretty);
        assert_eq!(logging.level, "info");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ServiceConfig, _> = toml::from_str(r#"region = "eu-west-2""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_log_config() {
        let logging = LoggingConfig {
            enabled: true,
            level: "debug".to_string(),
            format: LogFormat::Pretty,
        };
        let config = logging.to_log_config();
        assert_eq!(config.level, "debug");
        assert!(config.file_line_info);
    }
}
