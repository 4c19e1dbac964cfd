//! Error types for management API calls.
//!
//! Errors are categorized so callers can decide what to retry. Only
//! [`Error::NotFound`] is considered transient: the platform is eventually
//! consistent and an object that was just created or updated may not be
//! visible to the next query yet.

use thiserror::Error;

/// Categories of API errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection, TLS, timeout or non-2xx HTTP status
    Network,
    /// The server answered with a JSON-RPC error object
    Remote,
    /// A queried object was not (yet) visible
    NotFound,
    /// The response did not have the expected shape
    Protocol,
}

impl ErrorCategory {
    /// Whether this error category is typically transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Could not reach the management API",
            Self::Remote => "The management API rejected the request",
            Self::NotFound => "Object not found",
            Self::Protocol => "Unexpected API response",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check the API URL, network access and request timeout",
            Self::Remote => "Check the request fields and the API token's permissions",
            Self::NotFound => "Verify the object still exists or refresh local state",
            Self::Protocol => "Check that the server version is supported",
        }
    }
}

/// Errors that can occur while talking to the management API.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure
    #[error("HTTP error: {message}")]
    Http {
        /// Error message
        message: String,
        /// HTTP status code, when the server answered
        status: Option<u16>,
    },

    /// JSON-RPC error object returned by the server
    #[error("{method} failed: {message} ({data}) [code {code}]")]
    Rpc {
        /// Method that was called, e.g. `host.create`
        method: String,
        /// JSON-RPC error code
        code: i64,
        /// Short error message
        message: String,
        /// Detailed error text
        data: String,
    },

    /// A query returned no object for an id
    #[error("{kind} {id} not found")]
    NotFound {
        /// API object name, e.g. `item`
        kind: String,
        /// Requested id
        id: String,
    },

    /// The response was valid JSON but not the expected shape
    #[error("invalid response from {method}: {message}")]
    InvalidResponse {
        /// Method that was called
        method: String,
        /// What was wrong with the response
        message: String,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the error category for retry logic.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http { .. } => ErrorCategory::Network,
            Self::Rpc { .. } => ErrorCategory::Remote,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidResponse { .. } | Self::Json(_) => ErrorCategory::Protocol,
        }
    }

    /// Whether this error is typically transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Whether this is the not-found consistency sentinel.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Http {
                message: format!("HTTP {code}"),
                status: Some(code),
            },
            other => Self::Http {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_not_found_is_retryable() {
        assert!(ErrorCategory::NotFound.is_retryable());
        assert!(!ErrorCategory::Network.is_retryable());
        assert!(!ErrorCategory::Remote.is_retryable());
        assert!(!ErrorCategory::Protocol.is_retryable());
    }

    #[test]
    fn test_error_categories() {
        let err = Error::NotFound {
            kind: "item".into(),
            id: "42".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "item 42 not found");

        let err = Error::Rpc {
            method: "host.create".into(),
            code: -32602,
            message: "Invalid params.".into(),
            data: "Host with the same name \"web01\" already exists.".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_status_code() {
        let err = Error::from(ureq::Error::StatusCode(502));
        assert!(matches!(err, Error::Http { status: Some(502), .. }));
        assert_eq!(err.category(), ErrorCategory::Network);
    }
}
