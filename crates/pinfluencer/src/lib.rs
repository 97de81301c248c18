//! # Pinfluencer
//!
//! **Serverless HTTP API backend for the Pinfluencer brand/influencer marketplace**
//!
//! Every inbound gateway event is dispatched by route key to a flat sequence
//! of steps. Steps share one [`PinfluencerContext`](core::PinfluencerContext),
//! and any step can end the request early by setting a response and the
//! short-circuit flag.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pinfluencer::prelude::*;
//!
//! let app = Application::from_env(&collaborators)?;
//!
//! // One call per invocation
//! let response = app.handle_json(&raw_event);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Event → Dispatcher → route table → Sequence (flattened Steps)
//!                                        ↓
//!         before hooks → controller → after hooks
//!                                        ↓
//! Response ← snake→camel body ← PinfluencerContext.response
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod application;

pub use application::{Application, ApplicationError, CONFIG_FILE};

pub use pinfluencer_config as config;
pub use pinfluencer_core as core;
pub use pinfluencer_domain as domain;
pub use pinfluencer_middleware as middleware;
pub use pinfluencer_server as server;
pub use pinfluencer_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use pinfluencer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Application, ApplicationError};

    pub use pinfluencer_config::{ConfigLoader, PinfluencerConfig};
    pub use pinfluencer_core::{
        ApiGatewayEvent, ApiGatewayResponse, Container, ErrorCapsule, PinfluencerContext,
        PinfluencerError, PinfluencerResult,
    };
    pub use pinfluencer_domain::{
        AuthUserRepository, BrandRepository, CampaignRepository, DataManager, ImageRepository,
        InfluencerRepository, NotificationRepository,
    };
    pub use pinfluencer_middleware::{step, MiddlewarePipeline, Sequence, Step};
    pub use pinfluencer_server::{Collaborators, Dispatcher};
}
