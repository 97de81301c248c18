//! Error types for the Pinfluencer backend.
//!
//! [`PinfluencerError`] is the error type shared by collaborators, hooks and
//! controllers. Expected failures (not found, already exists, bad input) are
//! normally handled inside a step by short-circuiting the pipeline; anything
//! that escapes a step is rendered as a generic 500 by the dispatcher.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::di::InjectionError;
use crate::mapper::MappingError;
use crate::validation::ValidationError;

/// Result type alias using [`PinfluencerError`].
pub type PinfluencerResult<T> = Result<T, PinfluencerError>;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or missing input.
    Validation,
    /// Missing claims or ownership mismatch.
    Unauthorized,
    /// Repository lookup miss.
    NotFound,
    /// Duplicate create for the same auth user.
    AlreadyExists,
    /// Programming errors and broken wiring.
    Internal,
    /// Collaborator (database, object storage, identity provider) failures.
    External,
}

impl ErrorCategory {
    /// Returns the default HTTP status code for this error category.
    ///
    /// `AlreadyExists` maps to 400: a duplicate create is reported to the
    /// client as a bad request with an empty body.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::Validation | Self::AlreadyExists => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal | Self::External => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standard error type for the backend.
///
/// # Example
///
/// ```
/// use pinfluencer_core::{ErrorCategory, PinfluencerError};
///
/// let err = PinfluencerError::not_found("brand", "0d5c0f3a-6fbb-4f2c-9a4e-1b0d5f1f2a10");
/// assert_eq!(err.category(), ErrorCategory::NotFound);
/// assert!(err.is_not_found());
/// ```
#[derive(Error, Debug)]
pub enum PinfluencerError {
    /// Input failed validation.
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable error message.
        message: String,
        /// The field-level violation, when one was detected.
        #[source]
        violation: Option<ValidationError>,
    },

    /// Identity claims are missing or do not grant access.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message.
        message: String,
    },

    /// Entity not found.
    #[error("{resource_type} not found: {resource_id}")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// The identifier used for the lookup.
        resource_id: String,
    },

    /// Entity already exists for the auth user.
    #[error("{resource_type} already exists for auth user {auth_user_id}")]
    AlreadyExists {
        /// The type of resource.
        resource_type: String,
        /// The auth user that already owns one.
        auth_user_id: String,
    },

    /// Internal error.
    #[error("internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying error (never exposed to clients).
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A collaborator call failed.
    #[error("{collaborator} failed: {source}")]
    External {
        /// Name of the failing collaborator.
        collaborator: String,
        /// The underlying error (never exposed to clients).
        #[source]
        source: anyhow::Error,
    },

    /// Object mapping failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A dependency was not registered.
    #[error(transparent)]
    Injection(#[from] InjectionError),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PinfluencerError {
    /// Creates a validation error with a message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            violation: None,
        }
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }

    /// Creates an already exists error for a resource owned by an auth user.
    #[must_use]
    pub fn already_exists(resource_type: impl Into<String>, auth_user_id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource_type: resource_type.into(),
            auth_user_id: auth_user_id.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error with a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Wraps a collaborator failure.
    pub fn external(collaborator: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::External {
            collaborator: collaborator.into(),
            source: source.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Unauthorized { .. } => ErrorCategory::Unauthorized,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::AlreadyExists { .. } => ErrorCategory::AlreadyExists,
            Self::External { .. } => ErrorCategory::External,
            Self::Internal { .. }
            | Self::Mapping(_)
            | Self::Injection(_)
            | Self::Serialization(_) => ErrorCategory::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns `true` for repository lookup misses.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for duplicate creates.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns `true` when the error should be recovered by the step that saw it.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        !matches!(
            self.category(),
            ErrorCategory::Internal | ErrorCategory::External
        )
    }
}

impl From<ValidationError> for PinfluencerError {
    fn from(violation: ValidationError) -> Self {
        Self::Validation {
            message: violation.to_string(),
            violation: Some(violation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_status_codes() {
        assert_eq!(
            ErrorCategory::Validation.default_status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCategory::AlreadyExists.default_status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCategory::NotFound.default_status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCategory::Unauthorized.default_status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCategory::External.default_status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = PinfluencerError::not_found("brand", "abc");
        assert_eq!(err.to_string(), "brand not found: abc");
        assert!(err.is_not_found());
        assert!(!err.is_already_exists());
        assert!(err.is_expected());
    }

    #[test]
    fn test_already_exists() {
        let err = PinfluencerError::already_exists("influencer", "user-1");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_external_is_unexpected() {
        let err = PinfluencerError::external("image repository", anyhow::anyhow!("bucket gone"));
        assert_eq!(err.category(), ErrorCategory::External);
        assert!(!err.is_expected());
        assert!(err.to_string().contains("image repository"));
    }

    #[test]
    fn test_from_validation_error() {
        let violation = ValidationError {
            path: "$.brand_name".to_string(),
            message: "required field is missing".to_string(),
        };
        let err = PinfluencerError::from(violation);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("$.brand_name"));
    }

    #[test]
    fn test_serde_error_is_internal() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PinfluencerError::from(serde_err);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&ErrorCategory::AlreadyExists).unwrap();
        assert_eq!(json, "\"already_exists\"");
    }
}
