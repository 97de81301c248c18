//! Test response wrapper.

use http::StatusCode;
use pinfluencer_core::ApiGatewayResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TestError;

/// A dispatched response with helper methods for assertions.
#[derive(Debug, Clone)]
pub struct TestResponse {
    inner: ApiGatewayResponse,
}

impl TestResponse {
    /// Wraps a gateway response.
    #[must_use]
    pub const fn new(inner: ApiGatewayResponse) -> Self {
        Self { inner }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Returns the status code as a u16.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.inner.status_code
    }

    /// Returns true if the status is successful (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status().is_success()
    }

    /// Returns true if the status is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Returns true if the status is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// Gets a header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers.get(name).map(String::as_str)
    }

    /// Returns the raw (camelCase) body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.inner.body
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, TestError> {
        Ok(self.inner.json_body()?)
    }

    /// Deserializes the body into a type.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_str(&self.inner.body)?)
    }

    /// Returns the wrapped response.
    #[must_use]
    pub fn into_inner(self) -> ApiGatewayResponse {
        self.inner
    }

    /// Asserts the status code.
    ///
    /// # Panics
    ///
    /// Panics with the body when the status differs.
    #[track_caller]
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status(),
            expected,
            "unexpected status, body: {}",
            self.inner.body
        );
        self
    }

    /// Asserts the status code and that the body is `{"message": <message>}`.
    ///
    /// # Panics
    ///
    /// Panics when either differs.
    #[track_caller]
    pub fn assert_message(&self, expected: StatusCode, message: &str) -> &Self {
        self.assert_status(expected);
        assert_eq!(self.json().ok(), Some(serde_json::json!({ "message": message })));
        self
    }

    /// Asserts the body is the empty object.
    ///
    /// # Panics
    ///
    /// Panics when the body is anything else.
    #[track_caller]
    pub fn assert_empty_body(&self) -> &Self {
        assert_eq!(self.inner.body, "{}", "expected an empty body");
        self
    }

    /// Checks the status without panicking.
    pub fn expect_status(&self, expected: StatusCode) -> Result<&Self, TestError> {
        if self.status() == expected {
            Ok(self)
        } else {
            Err(TestError::Assertion(format!(
                "expected {expected}, got {} with body {}",
                self.status(),
                self.inner.body
            )))
        }
    }
}

impl From<ApiGatewayResponse> for TestResponse {
    fn from(inner: ApiGatewayResponse) -> Self {
        Self::new(inner)
    }
}
