//! Error types for SoftLayer operations.
//!
//! This module provides the error type shared by every SoftLayer crate and
//! the conversions from the HTTP and validation libraries.

use thiserror::Error;

/// Main error type for SoftLayer operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A caller supplied an unusable argument (e.g. an empty service name)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No client was supplied and no default client is installed
    #[error("No client available: pass a client or install a default client")]
    NoDefaultClient,

    /// Attribute is not present on the model object
    #[error("No such attribute: {0}")]
    NoSuchAttribute(String),

    /// The client that created a service has been dropped
    #[error("Client released before calling service {0}")]
    ClientReleased(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Timeout waiting for API: {0}")]
    Timeout(String),

    /// The API endpoint is unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The API answered with a SoftLayer exception
    #[error("API error: {code}: {message}")]
    ApiError {
        /// SoftLayer exception class (e.g. `SoftLayer_Exception_ObjectNotFound`)
        code: String,
        /// Error message
        message: String,
    },

    /// Failed to parse an API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Client options failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Specialized result type for SoftLayer operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::NoDefaultClient => "NO_DEFAULT_CLIENT",
            Self::NoSuchAttribute(_) => "NO_SUCH_ATTRIBUTE",
            Self::ClientReleased(_) => "CLIENT_RELEASED",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::ApiError { .. } => "API_ERROR",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the request that produced this error may succeed when retried.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::ServiceUnavailable(_))
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::InvalidArgument("test".to_string()).error_code(),
            "INVALID_ARGUMENT"
        );
        assert_eq!(Error::NoDefaultClient.error_code(), "NO_DEFAULT_CLIENT");
        assert_eq!(
            Error::NoSuchAttribute("test".to_string()).error_code(),
            "NO_SUCH_ATTRIBUTE"
        );
        assert_eq!(
            Error::ClientReleased("test".to_string()).error_code(),
            "CLIENT_RELEASED"
        );
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(Error::Timeout("test".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::Unauthorized("test".to_string()).error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(
            Error::ApiError {
                code: "SoftLayer_Exception".to_string(),
                message: "msg".to_string()
            }
            .error_code(),
            "API_ERROR"
        );
        assert_eq!(
            Error::ParseError("test".to_string()).error_code(),
            "PARSE_ERROR"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::NoSuchAttribute("fooBar".to_string());
        assert_eq!(err.to_string(), "No such attribute: fooBar");

        let err = Error::ApiError {
            code: "SoftLayer_Exception_ObjectNotFound".to_string(),
            message: "Unable to find object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error: SoftLayer_Exception_ObjectNotFound: Unable to find object"
        );
    }

    #[test]
    fn test_is_transient() {
        assert!(Error::Timeout("t".to_string()).is_transient());
        assert!(Error::ServiceUnavailable("t".to_string()).is_transient());
        assert!(!Error::NotFound("t".to_string()).is_transient());
        assert!(!Error::HttpError("t".to_string()).is_transient());
        assert!(!Error::NoDefaultClient.is_transient());
    }

    #[test]
    fn test_from_validation_errors() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("timeout", validator::ValidationError::new("range"));
        let err: Error = errors.into();
        assert!(matches!(err, Error::ValidationError(_)));
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
