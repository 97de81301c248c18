//! Per-request context types.
//!
//! A [`PinfluencerContext`] is created by the dispatcher for every inbound
//! event and handed by mutable reference to each step of the route's
//! sequence. Steps communicate only by mutating it.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::event::ApiGatewayEvent;

/// A unique identifier for each request, using UUID v7.
///
/// UUID v7 is time-ordered, which makes it ideal for log correlation.
///
/// # Example
///
/// ```
/// use pinfluencer_core::RequestId;
///
/// let id = RequestId::new();
/// println!("Request ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The response being built for the current request.
///
/// The dispatcher reads only `status_code` and `body` once the pipeline has
/// finished.
#[derive(Debug, Clone, PartialEq)]
pub struct PinfluencerResponse {
    /// Status code, 200 until a step changes it.
    pub status_code: StatusCode,
    /// Response body, a mapping or a sequence.
    pub body: Value,
}

impl Default for PinfluencerResponse {
    fn default() -> Self {
        Self {
            status_code: StatusCode::OK,
            body: Value::Object(Map::new()),
        }
    }
}

/// A structured error descriptor appended by a step.
///
/// The pipeline applies the first pending capsule right after the step that
/// appended it, which renders `{"message": ...}` with the capsule's status and
/// stops the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCapsule {
    /// Status code to respond with.
    pub status_code: StatusCode,
    /// Human-readable message.
    pub message: String,
}

impl ErrorCapsule {
    /// Creates a new capsule.
    #[must_use]
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Writes this capsule into the context's response and short-circuits.
    pub fn apply(&self, context: &mut PinfluencerContext) {
        context.response.status_code = self.status_code;
        context.response.body = json!({ "message": self.message });
        context.short_circuit = true;
    }
}

/// Mutable state of one request.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use pinfluencer_core::{ApiGatewayEvent, PinfluencerContext};
///
/// let mut ctx = PinfluencerContext::new(ApiGatewayEvent::new("GET /brands"));
/// assert_eq!(ctx.response.status_code, StatusCode::OK);
/// assert!(!ctx.short_circuit);
///
/// ctx.fail(StatusCode::BAD_REQUEST);
/// assert!(ctx.short_circuit);
/// assert_eq!(ctx.response.body, serde_json::json!({}));
/// ```
#[derive(Debug, Clone)]
pub struct PinfluencerContext {
    request_id: RequestId,

    /// The raw inbound event.
    pub event: ApiGatewayEvent,

    /// Parsed request body, empty until the body hook runs.
    pub body: Value,

    /// Authenticated user id, empty until the auth hook runs.
    pub auth_user_id: String,

    /// Resource id from the path, set by the id-validation hooks.
    pub id: String,

    /// The response under construction.
    pub response: PinfluencerResponse,

    /// When `true` no further step runs.
    pub short_circuit: bool,

    /// Structured errors appended by steps.
    pub error_capsules: Vec<ErrorCapsule>,
}

impl PinfluencerContext {
    /// Creates the context for one inbound event.
    #[must_use]
    pub fn new(event: ApiGatewayEvent) -> Self {
        Self {
            request_id: RequestId::new(),
            event,
            body: Value::Object(Map::new()),
            auth_user_id: String::new(),
            id: String::new(),
            response: PinfluencerResponse::default(),
            short_circuit: false,
            error_capsules: Vec::new(),
        }
    }

    /// Returns the request ID used for log correlation.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the route key of the inbound event.
    #[must_use]
    pub fn route_key(&self) -> &str {
        &self.event.route_key
    }

    /// Responds with `status` and an empty body, and stops the sequence.
    pub fn fail(&mut self, status: StatusCode) {
        self.fail_with(status, Value::Object(Map::new()));
    }

    /// Responds with `status` and `body`, and stops the sequence.
    pub fn fail_with(&mut self, status: StatusCode, body: Value) {
        self.response.status_code = status;
        self.response.body = body;
        self.short_circuit = true;
    }

    /// Sets a successful response without stopping the sequence.
    pub fn respond(&mut self, status: StatusCode, body: Value) {
        self.response.status_code = status;
        self.response.body = body;
    }

    /// Appends an error capsule.
    pub fn push_error(&mut self, capsule: ErrorCapsule) {
        self.error_capsules.push(capsule);
    }
}
