//! # Pinfluencer Core
//!
//! Core types shared by every crate of the Pinfluencer backend:
//!
//! - [`PinfluencerContext`] - Per-request state threaded through a sequence of steps
//! - [`ApiGatewayEvent`] / [`ApiGatewayResponse`] - Inbound event and outbound wire response
//! - [`PinfluencerError`] - Error type with a status-code mapping
//! - [`Container`] - Registry of shared instances keyed by type
//! - [`schema`] - Compile-time record descriptors emitted by `#[derive(Describe)]`
//! - [`ObjectMapper`] - Structural copying between records, with custom rules
//! - [`PayloadValidator`] - Body validation against record descriptors
//! - [`codec`] - camelCase/snake_case JSON body conversion
//! - [`fixtures`] - Test data generation

#![warn(missing_docs)]
#![forbid(unsafe_code)]

extern crate self as pinfluencer_core;

pub mod codec;
mod context;
mod di;
mod error;
mod event;
pub mod fixtures;
pub mod ids;
pub mod mapper;
pub mod schema;
pub mod validation;

pub use codec::{BodyDeserializer, BodySerializer, JsonCamelToSnakeDeserializer, JsonSnakeToCamelSerializer};
pub use context::{ErrorCapsule, PinfluencerContext, PinfluencerResponse, RequestId};
pub use di::{Container, InjectionError};
pub use error::{ErrorCategory, PinfluencerError, PinfluencerResult};
pub use event::{
    ApiGatewayEvent, ApiGatewayResponse, Authorizer, EventRequestContext, Jwt,
    CLIENT_ERROR_MESSAGE, NOT_IMPLEMENTED_MESSAGE, SERVER_ERROR_MESSAGE, USERNAME_CLAIM,
};
pub use mapper::{MappingError, MappingRules, ObjectMapper};
pub use schema::{Describe, Kind, Record, Schema, Tagged};
pub use validation::{PayloadValidator, ValidationError};
