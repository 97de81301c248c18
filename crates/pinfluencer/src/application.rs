//! Process-level wiring of one deployment.

use pinfluencer_config::{ConfigError, ConfigLoader, PinfluencerConfig, ENV_PREFIX};
use pinfluencer_core::{ApiGatewayEvent, ApiGatewayResponse};
use pinfluencer_server::{bootstrap, Collaborators, Dispatcher, DispatcherError};
use pinfluencer_telemetry::{init_logging, TelemetryError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration file read from the working directory when present.
pub const CONFIG_FILE: &str = "pinfluencer.toml";

/// Errors raised while starting the application.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The log subscriber could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// The dispatch table could not be built.
    #[error(transparent)]
    Dispatcher(#[from] DispatcherError),
}

/// A configured dispatcher, built once per process and reused for every
/// invocation.
///
/// ```rust,ignore
/// use pinfluencer::Application;
///
/// let app = Application::from_env(&collaborators)?;
/// let response = app.handle(event);
/// ```
#[derive(Debug)]
pub struct Application {
    config: PinfluencerConfig,
    dispatcher: Dispatcher,
}

impl Application {
    /// Builds the dispatcher for `collaborators` under `config`.
    ///
    /// Does not touch the global log subscriber.
    pub fn new(
        config: PinfluencerConfig,
        collaborators: &Collaborators,
    ) -> Result<Self, ApplicationError> {
        config.validate()?;

        let container = bootstrap(collaborators, &config.images.bucket_url);
        let dispatcher = Dispatcher::new(&container)?;
        info!(
            service = %config.service.name,
            environment = %config.service.environment,
            routes = dispatcher.route_keys().count(),
            "application ready"
        );

        Ok(Self { config, dispatcher })
    }

    /// Loads configuration from `.env`, [`CONFIG_FILE`] and `PINFLUENCER__*`
    /// variables, installs logging and builds the dispatcher.
    pub fn from_env(collaborators: &Collaborators) -> Result<Self, ApplicationError> {
        let loader = ConfigLoader::new()
            .with_dotenv()?
            .with_optional_file(CONFIG_FILE)?
            .with_env_prefix(ENV_PREFIX);
        Self::from_loader(loader, collaborators)
    }

    /// Like [`Self::from_env`] over an explicitly prepared loader.
    pub fn from_loader(
        loader: ConfigLoader,
        collaborators: &Collaborators,
    ) -> Result<Self, ApplicationError> {
        let config = loader.load()?;
        install_logging(&config)?;
        Self::new(config, collaborators)
    }

    /// Dispatches one inbound event.
    pub fn handle(&self, event: ApiGatewayEvent) -> ApiGatewayResponse {
        self.dispatcher.dispatch(event)
    }

    /// Dispatches a raw JSON event as delivered by the gateway.
    ///
    /// An event that does not deserialize never reaches a route and gets the
    /// generic 400 response.
    pub fn handle_json(&self, raw: &str) -> ApiGatewayResponse {
        match serde_json::from_str::<ApiGatewayEvent>(raw) {
            Ok(event) => self.handle(event),
            Err(err) => {
                warn!(error = %err, "malformed gateway event");
                ApiGatewayResponse::client_error()
            }
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &PinfluencerConfig {
        &self.config
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

// A warm container may start a second application in the same process.
fn install_logging(config: &PinfluencerConfig) -> Result<(), TelemetryError> {
    match init_logging(&config.logging.to_log_config()) {
        Err(TelemetryError::LoggingInit(reason)) => {
            debug!(%reason, "log subscriber already installed");
            Ok(())
        }
        other => other,
    }
}
