//! Middleware pipeline executor.
//!
//! The pipeline runs a flattened sequence of steps against one request
//! context, strictly in order. It owns a single rule: once
//! `context.short_circuit` is set, no further step runs. Individual steps
//! never need to check the flag themselves.
//!
//! ## Error capsules
//!
//! A step may report a failure by appending an [`ErrorCapsule`] instead of
//! writing the response directly. After each step the pipeline applies the
//! first capsule appended during that step, which renders
//! `{"message": ...}` with the capsule's status and stops the sequence.
//!
//! ## Unexpected errors
//!
//! An `Err` returned by a step is not handled here. It stops the sequence
//! and propagates to the dispatcher, which answers with a generic 500.
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use pinfluencer_core::{ApiGatewayEvent, PinfluencerContext};
//! use pinfluencer_middleware::{MiddlewarePipeline, Step};
//!
//! let steps = vec![
//!     Step::new("reject", |ctx: &mut PinfluencerContext| {
//!         ctx.fail(StatusCode::BAD_REQUEST);
//!     }),
//!     Step::new("unreachable", |ctx: &mut PinfluencerContext| {
//!         ctx.id = "ran".to_string();
//!     }),
//! ];
//!
//! let mut ctx = PinfluencerContext::new(ApiGatewayEvent::new("GET /brands"));
//! MiddlewarePipeline::new().execute(&mut ctx, &steps).unwrap();
//!
//! assert_eq!(ctx.response.status_code, StatusCode::BAD_REQUEST);
//! assert!(ctx.id.is_empty());
//! ```

use pinfluencer_core::{PinfluencerContext, PinfluencerResult};
use tracing::{debug, warn};

use crate::step::Step;

/// Executes step lists against a request context.
///
/// Stateless; one instance is shared by every route.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiddlewarePipeline;

impl MiddlewarePipeline {
    /// Creates a pipeline.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs `steps` in order until one short-circuits or fails.
    ///
    /// Returns the first unexpected error raised by a step.
    pub fn execute(&self, context: &mut PinfluencerContext, steps: &[Step]) -> PinfluencerResult<()> {
        for (index, step) in steps.iter().enumerate() {
            if context.short_circuit {
                debug!(
                    route = %context.route_key(),
                    skipped = steps.len() - index,
                    "sequence short-circuited"
                );
                return Ok(());
            }

            let pending = context.error_capsules.len();
            debug!(step = step.name(), "running step");
            step.call(context)?;

            if let Some(capsule) = context.error_capsules.get(pending).cloned() {
                capsule.apply(context);
            }

            if context.short_circuit {
                warn!(
                    request_id = %context.request_id(),
                    route = %context.route_key(),
                    step = step.name(),
                    status = context.response.status_code.as_u16(),
                    "step stopped the sequence"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use parking_lot::Mutex;
    use pinfluencer_core::{ApiGatewayEvent, ErrorCapsule, PinfluencerError};
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx() -> PinfluencerContext {
        PinfluencerContext::new(ApiGatewayEvent::new("GET /test"))
    }

    /// A step that records its index when it runs.
    fn spy(order: &Arc<Mutex<Vec<usize>>>, index: usize, stop: bool) -> Step {
        let order = Arc::clone(order);
        Step::new("spy", move |ctx: &mut PinfluencerContext| {
            order.lock().push(index);
            if stop {
                ctx.short_circuit = true;
            }
        })
    }

    #[test]
    fn test_pipeline_executes_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let steps: Vec<_> = (0..3).map(|i| spy(&order, i, false)).collect();

        MiddlewarePipeline::new().execute(&mut ctx(), &steps).unwrap();

        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_pipeline() {
        let mut ctx = ctx();
        MiddlewarePipeline::new().execute(&mut ctx, &[]).unwrap();
        assert_eq!(ctx.response.status_code, StatusCode::OK);
    }

    #[test]
    fn test_already_short_circuited_runs_nothing() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut ctx = ctx();
        ctx.short_circuit = true;

        MiddlewarePipeline::new()
            .execute(&mut ctx, &[spy(&order, 0, false)])
            .unwrap();

        assert!(order.lock().is_empty());
    }

    #[test]
    fn test_error_capsule_applied_after_step() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let steps = vec![
            Step::new("capsule", |ctx: &mut PinfluencerContext| {
                ctx.push_error(ErrorCapsule::new(StatusCode::NOT_FOUND, "audience data not found"));
            }),
            spy(&order, 1, false),
        ];
        let mut ctx = ctx();

        MiddlewarePipeline::new().execute(&mut ctx, &steps).unwrap();

        assert!(order.lock().is_empty());
        assert!(ctx.short_circuit);
        assert_eq!(ctx.response.status_code, StatusCode::NOT_FOUND);
        assert_eq!(ctx.response.body, json!({"message": "audience data not found"}));
    }

    #[test]
    fn test_first_new_capsule_wins() {
        let steps = vec![Step::new("two capsules", |ctx: &mut PinfluencerContext| {
            ctx.push_error(ErrorCapsule::new(StatusCode::BAD_REQUEST, "first"));
            ctx.push_error(ErrorCapsule::new(StatusCode::NOT_FOUND, "second"));
        })];
        let mut ctx = ctx();

        MiddlewarePipeline::new().execute(&mut ctx, &steps).unwrap();

        assert_eq!(ctx.response.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(ctx.response.body["message"], "first");
    }

    #[test]
    fn test_stale_capsules_are_ignored() {
        let mut ctx = ctx();
        ctx.push_error(ErrorCapsule::new(StatusCode::IM_A_TEAPOT, "earlier"));
        let steps = vec![Step::new("noop", |_: &mut PinfluencerContext| {})];

        MiddlewarePipeline::new().execute(&mut ctx, &steps).unwrap();

        assert!(!ctx.short_circuit);
        assert_eq!(ctx.response.status_code, StatusCode::OK);
    }

    #[test]
    fn test_error_propagates_and_stops() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let steps = vec![
            Step::new("boom", |_: &mut PinfluencerContext| -> PinfluencerResult<()> {
                Err(PinfluencerError::internal("boom"))
            }),
            spy(&order, 1, false),
        ];

        let result = MiddlewarePipeline::new().execute(&mut ctx(), &steps);

        assert!(result.is_err());
        assert!(order.lock().is_empty());
    }

    proptest! {
        #[test]
        fn prop_no_step_after_short_circuit(len in 1usize..24, stop_at in 0usize..24) {
            let stop_at = stop_at % len;
            let order = Arc::new(Mutex::new(Vec::new()));
            let steps: Vec<_> = (0..len).map(|i| spy(&order, i, i == stop_at)).collect();
            let mut ctx = ctx();

            MiddlewarePipeline::new().execute(&mut ctx, &steps).unwrap();

            prop_assert_eq!(order.lock().clone(), (0..=stop_at).collect::<Vec<_>>());
            prop_assert!(ctx.short_circuit);
        }
    }
}
