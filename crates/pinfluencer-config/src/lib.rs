//! Typed configuration for the Pinfluencer backend.
//!
//! Configuration is layered: built-in defaults, then an optional TOML or
//! JSON file, then environment variables. Unknown fields are rejected at
//! every layer.
//!
//! # Example
//!
//! ```no_run
//! use pinfluencer_config::{ConfigLoader, ENV_PREFIX};
//!
//! # fn main() -> Result<(), pinfluencer_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("pinfluencer.toml")?
//!     .with_env_prefix(ENV_PREFIX)
//!     .load()?;
//!
//! println!("images served from {}", config.images.bucket_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [images]
//! bucket_url = "https://pinfluencer-product-images.s3.eu-west-2.amazonaws.com"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [service]
//! name = "pinfluencer-backend"
//! environment = "production"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Keys follow `PREFIX__SECTION__KEY`:
//!
//! - `PINFLUENCER__IMAGES__BUCKET_URL=https://cdn.example.com`
//! - `PINFLUENCER__LOGGING__LEVEL=pinfluencer_server=debug,info`
//! - `PINFLUENCER__SERVICE__ENVIRONMENT=staging`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::PinfluencerConfig;
pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_PREFIX};
pub use schema::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_file_format_parses() {
        let toml = r#"
            [images]
            bucket_url = "https://pinfluencer-product-images.s3.eu-west-2.amazonaws.com"

            [logging]
            enabled = true
            level = "info"
            format = "json"

            [service]
            name = "pinfluencer-backend"
            environment = "production"
        "#;

        let config = ConfigLoader::new().with_string(toml, "toml").unwrap().load().unwrap();
        assert_eq!(config.service.environment, "production");
        assert_eq!(config.images.bucket_url, DEFAULT_BUCKET_URL);
    }
}
