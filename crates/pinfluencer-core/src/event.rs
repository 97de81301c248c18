//! Inbound and outbound wire shapes of the HTTP API gateway integration.

use std::collections::{BTreeMap, HashMap};

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Message returned with every 500 response.
pub const SERVER_ERROR_MESSAGE: &str = "unexpected server error, please try later :(";

/// Message returned with generic 400 responses.
pub const CLIENT_ERROR_MESSAGE: &str = "Client error, please check request.";

/// Message returned by routes that are mapped but not implemented.
pub const NOT_IMPLEMENTED_MESSAGE: &str = "not implemented";

/// Name of the identity-provider claim carrying the auth user id.
pub const USERNAME_CLAIM: &str = "username";

/// An inbound routed HTTP event (API gateway payload format 2.0).
///
/// Only `routeKey` is required; every other section defaults to empty.
///
/// ```
/// use pinfluencer_core::ApiGatewayEvent;
///
/// let event: ApiGatewayEvent = serde_json::from_value(serde_json::json!({
///     "routeKey": "GET /brands/{brand_id}",
///     "pathParameters": {"brand_id": "8b2c3c3e-7d9b-4a57-a8f3-4f1f4b0e2b9e"}
/// }))
/// .unwrap();
///
/// assert_eq!(event.route_key, "GET /brands/{brand_id}");
/// assert!(event.path_parameter("brand_id").is_some());
/// assert!(event.claim("username").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayEvent {
    /// `"<METHOD> <path-template>"`.
    pub route_key: String,

    /// Path-template placeholder name to value.
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,

    /// Request headers.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// Authorizer context populated by the gateway.
    #[serde(default)]
    pub request_context: Option<EventRequestContext>,

    /// Raw request payload.
    #[serde(default)]
    pub body: Option<String>,
}

/// The `requestContext` section of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRequestContext {
    /// Authorizer output.
    #[serde(default)]
    pub authorizer: Option<Authorizer>,
}

/// The `requestContext.authorizer` section of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorizer {
    /// JWT authorizer output.
    #[serde(default)]
    pub jwt: Option<Jwt>,
}

/// Claims asserted by the identity provider for the bearer token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Jwt {
    /// Claim name to claim value.
    #[serde(default)]
    pub claims: HashMap<String, String>,
}

impl ApiGatewayEvent {
    /// Creates an event for a route key with no parameters, claims or body.
    #[must_use]
    pub fn new(route_key: impl Into<String>) -> Self {
        Self {
            route_key: route_key.into(),
            ..Self::default()
        }
    }

    /// Returns a path parameter by name.
    #[must_use]
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// Returns an identity claim by name.
    #[must_use]
    pub fn claim(&self, name: &str) -> Option<&str> {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.authorizer.as_ref())
            .and_then(|authorizer| authorizer.jwt.as_ref())
            .and_then(|jwt| jwt.claims.get(name))
            .map(String::as_str)
    }

    /// Returns the auth user id asserted by the `username` claim.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.claim(USERNAME_CLAIM)
    }
}

/// The outbound response handed back to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// JSON-serialized body.
    pub body: String,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
}

impl ApiGatewayResponse {
    /// Creates a response with the fixed JSON and permissive CORS headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            body: body.into(),
            headers: default_headers(),
        }
    }

    /// Creates a response whose body is `{"message": <message>}`.
    #[must_use]
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::new(status, json!({ "message": message }).to_string())
    }

    /// The generic 400 response.
    #[must_use]
    pub fn client_error() -> Self {
        Self::message(StatusCode::BAD_REQUEST, CLIENT_ERROR_MESSAGE)
    }

    /// The generic 500 response.
    #[must_use]
    pub fn server_error() -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
    }

    /// The 404 response for a route key absent from the dispatch table.
    #[must_use]
    pub fn route_not_found(route_key: &str) -> Self {
        Self::message(
            StatusCode::NOT_FOUND,
            &format!("route: {route_key} not found"),
        )
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Parses the body back into JSON.
    pub fn json_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

fn default_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "*"),
        ("Access-Control-Allow-Methods", "*"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}
