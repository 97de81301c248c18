//! Test error types.

use thiserror::Error;

/// Errors raised while inspecting a test response.
#[derive(Debug, Error)]
pub enum TestError {
    /// The response body is not the expected JSON.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An assertion on the response failed.
    #[error("assertion failed: {0}")]
    Assertion(String),
}
