//! Route key to response.
//!
//! Every route of the table is built and flattened once, when the
//! dispatcher is created. A dispatch then only looks the key up, runs the
//! flat step list against a fresh context and renders the result.
//!
//! ```text
//! event ── lookup ──┬── missing ──────────────> 404 {"message": "route: <key> not found"}
//!                   └── steps ── pipeline ──┬── Ok ──────> context.response
//!                                           ├── Err ─────> 500 (rollback)
//!                                           └── panic ───> 500 (rollback)
//! ```
//!
//! The persistence session is released on every one of these paths.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::IndexMap;
use pinfluencer_core::{
    ApiGatewayEvent, ApiGatewayResponse, BodySerializer, Container, InjectionError,
    PinfluencerContext,
};
use pinfluencer_domain::DataManager;
use pinfluencer_middleware::{MiddlewarePipeline, Step};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::routes::{RouteTable, RouteTableError};
use crate::sequences::{SequenceKind, SequenceParts};

/// Errors raised while building a dispatcher.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// The route table could not be loaded.
    #[error(transparent)]
    Routes(#[from] RouteTableError),

    /// A shared instance is missing from the registry.
    #[error(transparent)]
    Injection(#[from] InjectionError),
}

#[derive(Debug, Clone)]
struct Route {
    sequence: SequenceKind,
    steps: Arc<[Step]>,
}

/// Runs inbound events through their route's sequence.
pub struct Dispatcher {
    routes: IndexMap<String, Route>,
    pipeline: Arc<MiddlewarePipeline>,
    serializer: Arc<dyn BodySerializer>,
    session: Arc<dyn DataManager>,
}

impl Dispatcher {
    /// Builds a dispatcher for the deployed route table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is malformed or the registry lacks a
    /// shared instance.
    pub fn new(container: &Container) -> Result<Self, DispatcherError> {
        Self::with_routes(&RouteTable::deployed()?, container)
    }

    /// Builds a dispatcher for `table`.
    ///
    /// Routes bound to the same sequence share one flattened step list.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry lacks a shared instance.
    pub fn with_routes(table: &RouteTable, container: &Container) -> Result<Self, DispatcherError> {
        let parts = SequenceParts::resolve(container)?;
        let mut built: HashMap<SequenceKind, Arc<[Step]>> = HashMap::new();

        let routes = table
            .iter()
            .map(|(key, sequence)| {
                let steps = built
                    .entry(sequence)
                    .or_insert_with(|| sequence.build(&parts).flatten().into())
                    .clone();
                (key.to_string(), Route { sequence, steps })
            })
            .collect::<IndexMap<_, _>>();

        debug!(routes = routes.len(), sequences = built.len(), "dispatch table built");

        Ok(Self {
            routes,
            pipeline: container.resolve_required()?,
            serializer: container.resolve_required()?,
            session: container.resolve_required()?,
        })
    }

    /// Handles one inbound event.
    ///
    /// Never fails: unknown routes become 404 and every error or panic
    /// raised while running the sequence becomes the generic 500.
    pub fn dispatch(&self, event: ApiGatewayEvent) -> ApiGatewayResponse {
        let Some(route) = self.routes.get(&event.route_key) else {
            warn!(route = %event.route_key, "route not found");
            return ApiGatewayResponse::route_not_found(&event.route_key);
        };

        let _session = SessionGuard(self.session.as_ref());
        let mut context = PinfluencerContext::new(event);
        let request_id = context.request_id();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pipeline.execute(&mut context, &route.steps)
        }));

        let response = match outcome {
            Ok(Ok(())) => self.render(&context),
            Ok(Err(err)) => {
                error!(
                    request_id = %request_id,
                    route = %context.route_key(),
                    category = ?err.category(),
                    error = ?err,
                    "sequence failed"
                );
                self.rollback();
                ApiGatewayResponse::server_error()
            }
            Err(payload) => {
                error!(
                    request_id = %request_id,
                    route = %context.route_key(),
                    panic = panic_message(payload.as_ref()),
                    "sequence panicked"
                );
                self.rollback();
                ApiGatewayResponse::server_error()
            }
        };

        info!(
            request_id = %request_id,
            route = %context.route_key(),
            sequence = route.sequence.name(),
            status = response.status_code,
            "request dispatched"
        );
        response
    }

    /// The sequence bound to a route key.
    #[must_use]
    pub fn sequence(&self, route_key: &str) -> Option<SequenceKind> {
        self.routes.get(route_key).map(|route| route.sequence)
    }

    /// Names of the flattened steps of a route.
    #[must_use]
    pub fn steps(&self, route_key: &str) -> Option<Vec<&'static str>> {
        self.routes
            .get(route_key)
            .map(|route| route.steps.iter().map(Step::name).collect())
    }

    /// Iterates over the routed keys.
    pub fn route_keys(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    fn render(&self, context: &PinfluencerContext) -> ApiGatewayResponse {
        match self.serializer.serialize(&context.response.body) {
            Ok(body) => ApiGatewayResponse::new(context.response.status_code, body),
            Err(err) => {
                error!(request_id = %context.request_id(), error = %err, "response body not serializable");
                ApiGatewayResponse::server_error()
            }
        }
    }

    fn rollback(&self) {
        if let Err(err) = self.session.rollback() {
            error!(error = ?err, "rollback failed");
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.routes.len())
            .finish_non_exhaustive()
    }
}

/// Releases the session when the dispatch scope ends, unwinding included.
struct SessionGuard<'a>(&'a dyn DataManager);

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.0.cleanup();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
