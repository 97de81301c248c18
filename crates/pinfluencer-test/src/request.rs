//! Test event building.

use std::collections::HashMap;

use pinfluencer_core::{ApiGatewayEvent, Authorizer, EventRequestContext, Jwt, USERNAME_CLAIM};
use serde::Serialize;

/// Builder for gateway events as a route would receive them.
///
/// ```
/// use pinfluencer_test::EventBuilder;
///
/// let event = EventBuilder::new("GET /brands/{brand_id}")
///     .path("brand_id", "8b2c3c3e-7d9b-4a57-a8f3-4f1f4b0e2b9e")
///     .username("user-1")
///     .build();
///
/// assert_eq!(event.username(), Some("user-1"));
/// assert!(event.path_parameter("brand_id").is_some());
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct EventBuilder {
    route_key: String,
    path_parameters: HashMap<String, String>,
    headers: HashMap<String, String>,
    claims: HashMap<String, String>,
    body: Option<String>,
}

impl EventBuilder {
    /// Starts an event for a route key such as `"POST /brands/me"`.
    pub fn new(route_key: impl Into<String>) -> Self {
        Self {
            route_key: route_key.into(),
            path_parameters: HashMap::new(),
            headers: HashMap::new(),
            claims: HashMap::new(),
            body: None,
        }
    }

    /// Sets a path parameter.
    pub fn path(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Sets a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets an identity claim.
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Sets the `username` claim naming the auth user.
    pub fn username(self, auth_user_id: impl Into<String>) -> Self {
        self.claim(USERNAME_CLAIM, auth_user_id)
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the body.
    ///
    /// Keys are sent as given; use camelCase to mirror real clients.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        self.body = serde_json::to_string(value).ok();
        self
    }

    /// Builds the event. Empty sections are left out like the gateway does.
    pub fn build(self) -> ApiGatewayEvent {
        let mut event = ApiGatewayEvent::new(self.route_key);
        event.body = self.body;
        if !self.path_parameters.is_empty() {
            event.path_parameters = Some(self.path_parameters);
        }
        if !self.headers.is_empty() {
            event.headers = Some(self.headers);
        }
        if !self.claims.is_empty() {
            event.request_context = Some(EventRequestContext {
                authorizer: Some(Authorizer {
                    jwt: Some(Jwt { claims: self.claims }),
                }),
            });
        }
        event
    }
}
