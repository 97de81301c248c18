//! # Pinfluencer Middleware
//!
//! Request processing for the Pinfluencer backend: routes are declared as
//! sequences of steps, flattened once, and executed against one mutable
//! request context per event.
//!
//! ## Flow
//!
//! ```text
//! Sequence (tree) ──flatten──▶ [Step] ──MiddlewarePipeline::execute──▶ PinfluencerContext
//! ```
//!
//! - [`Step`] - a named function over the context; [`step!`] binds a method of a shared hook group or controller
//! - [`Sequence`] - steps and nested subsequences; [`Sequence::flatten`] expands them depth-first
//! - [`MiddlewarePipeline`] - runs a flat step list, stopping on short-circuit
//! - [`hooks`] - the hook library
//!
//! ## Example
//!
//! ```
//! use http::StatusCode;
//! use pinfluencer_core::{ApiGatewayEvent, PinfluencerContext};
//! use pinfluencer_middleware::{MiddlewarePipeline, Sequence, Step};
//!
//! let parse = Sequence::new("parse").step(Step::new("parse", |ctx: &mut PinfluencerContext| {
//!     ctx.body = serde_json::json!({"parsed": true});
//! }));
//! let route = Sequence::new("route")
//!     .then(parse)
//!     .step(Step::new("respond", |ctx: &mut PinfluencerContext| {
//!         let body = ctx.body.clone();
//!         ctx.respond(StatusCode::CREATED, body);
//!     }));
//!
//! let mut ctx = PinfluencerContext::new(ApiGatewayEvent::new("POST /things"));
//! MiddlewarePipeline::new().execute(&mut ctx, &route.flatten()).unwrap();
//!
//! assert_eq!(ctx.response.status_code, StatusCode::CREATED);
//! assert_eq!(ctx.response.body["parsed"], true);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod hooks;
pub mod pipeline;
pub mod sequence;
pub mod step;

pub use pipeline::MiddlewarePipeline;
pub use sequence::{Component, Sequence};
pub use step::{Step, StepFn, StepOutcome};
