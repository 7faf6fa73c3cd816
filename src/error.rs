//! Error types for the Pluvo API client.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Pluvo operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Pluvo API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: HTTP status {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message from the API
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API
    #[error("Rate limited; retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Number of seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Index into a paged collection was out of range
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange {
        /// The index as supplied by the caller (may be negative)
        index: i64,
        /// The collection length at the time of access
        len: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } => true,
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::NotFound(_) | Error::IndexOutOfRange { .. } | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from an error response body.
    ///
    /// Pluvo error responses carry a top-level `message` field.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        Error::Api {
            status,
            message,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(Error::RateLimited {
            retry_after_secs: 30
        }
        .is_retryable());
        assert!(Error::Api {
            status: 503,
            message: "down".into(),
            body: Value::Null,
        }
        .is_retryable());
        assert!(!Error::Config("bad".into()).is_retryable());
        assert!(!Error::IndexOutOfRange { index: -4, len: 3 }.is_retryable());
    }

    #[test]
    fn test_error_classification() {
        let err = Error::Api {
            status: 400,
            message: "bad request".into(),
            body: Value::Null,
        };
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        assert!(Error::IndexOutOfRange { index: 5, len: 3 }.is_client_error());
    }

    #[test]
    fn test_from_api_response() {
        let body = serde_json::json!({ "message": "error message" });

        let err = Error::from_api_response(400, body);
        match &err {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "error message");
            }
            _ => panic!("Expected Api error"),
        }
        assert_eq!(err.to_string(), "API error: HTTP status 400 - error message");
    }

    #[test]
    fn test_from_api_response_missing_message() {
        let err = Error::from_api_response(500, Value::Null);
        match err {
            Error::Api { message, .. } => assert_eq!(message, "Unknown API error"),
            _ => panic!("Expected Api error"),
        }
    }
}
