//! Error types for reconciliation operations.
//!
//! Errors are categorized so the command layer can tell validation problems
//! (fix the manifest) apart from remote failures (check the server) and from
//! instances whose remote state is no longer known.

use declarative::{Diagnostics, Interruption, InvalidConfiguration, Retryable};
use thiserror::Error;

/// Categories of reconciliation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Declared attributes violate an invariant
    Validation,
    /// Remote data is inconsistent with what the operation needs
    Integrity,
    /// The object may become visible if queried again
    Transient,
    /// The operation was cancelled or ran out of time
    Cancelled,
    /// The remote API rejected the call or could not be reached
    Remote,
    /// Some fields could not be populated
    Partial,
    /// The mutation happened but its outcome could not be read back
    Unknown,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(self) -> &'static str {
        match self {
            Self::Validation => "Invalid configuration",
            Self::Integrity => "Inconsistent remote data",
            Self::Transient => "Object not yet visible",
            Self::Cancelled => "Operation interrupted",
            Self::Remote => "Remote API error",
            Self::Partial => "Some attributes could not be read",
            Self::Unknown => "Remote state unknown",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(self) -> &'static str {
        match self {
            Self::Validation => "Fix the listed attributes in the manifest",
            Self::Integrity => "Inspect the referenced objects in the frontend",
            Self::Transient => "Retry later or raise the retry limits in the config",
            Self::Cancelled => "Raise operation_timeout_secs or rerun the command",
            Self::Remote => "Check the API URL, token permissions and server logs",
            Self::Partial => "Check the listed attributes; the rest of the state was saved",
            Self::Unknown => "Run `zbx refresh` before changing this instance again",
        }
    }
}

/// Errors that can occur while reconciling an instance.
#[derive(Debug, Error)]
pub enum Error {
    /// Declared attributes violate one or more invariants
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfiguration),

    /// A declared token has no code in its classification
    #[error("unknown {classification} \"{token}\"")]
    UnknownToken {
        /// Classification name, e.g. `interface type`
        classification: &'static str,
        token: String,
    },

    /// A remote code has no token in its classification
    #[error("unknown {classification} code {code}")]
    UnknownCode {
        classification: &'static str,
        code: i64,
    },

    /// A child object does not resolve to exactly one parent
    #[error("{kind} {id} resolved to {children} objects with {parents} parents, expected exactly one of each")]
    AmbiguousParentage {
        kind: &'static str,
        id: String,
        children: usize,
        parents: usize,
    },

    /// A reference could not be resolved
    #[error("cannot resolve {reference}: {reason}")]
    ReferenceNotFound { reference: String, reason: String },

    /// Every retry attempt failed with a transient error
    #[error("gave up after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    /// The operation was cancelled or its deadline passed
    #[error(transparent)]
    Cancelled(#[from] Interruption),

    /// Some fields of a read failed; the others were populated
    #[error("{} attribute(s) could not be read: {diagnostics}", .diagnostics.error_count())]
    PartialFieldErrors { diagnostics: Diagnostics },

    /// The mutation happened but reading it back failed
    #[error("{id} was changed but could not be read back: {source}")]
    StateUnknown {
        id: String,
        #[source]
        source: Box<Error>,
    },

    /// Remote API failure
    #[error(transparent)]
    Api(#[from] zabbix_api::Error),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration(_) | Self::UnknownToken { .. } => ErrorCategory::Validation,
            Self::UnknownCode { .. } | Self::AmbiguousParentage { .. } | Self::ReferenceNotFound { .. } => {
                ErrorCategory::Integrity
            }
            Self::Api(e) if e.is_retryable() => ErrorCategory::Transient,
            Self::RetryExhausted { .. } | Self::Api(_) => ErrorCategory::Remote,
            Self::Cancelled(_) => ErrorCategory::Cancelled,
            Self::PartialFieldErrors { .. } => ErrorCategory::Partial,
            Self::StateUnknown { .. } => ErrorCategory::Unknown,
        }
    }

    /// Whether the remote object may exist in a state we did not record.
    pub fn is_state_unknown(&self) -> bool {
        matches!(self, Self::StateUnknown { .. })
    }
}

impl Retryable for Error {
    fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }
}

impl From<declarative::RetryError<Self>> for Error {
    fn from(err: declarative::RetryError<Self>) -> Self {
        match err {
            declarative::RetryError::Fatal(e) => e,
            declarative::RetryError::Exhausted { attempts, last } => Self::RetryExhausted {
                attempts,
                source: Box::new(last),
            },
            declarative::RetryError::Interrupted { reason, .. } => Self::Cancelled(reason),
        }
    }
}

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> Error {
        Error::Api(zabbix_api::Error::NotFound {
            kind: "item".into(),
            id: "1".into(),
        })
    }

    #[test]
    fn test_only_api_not_found_is_retryable() {
        assert!(not_found().is_retryable());
        assert!(
            !Error::ReferenceNotFound {
                reference: "{1}".into(),
                reason: "no such function".into(),
            }
            .is_retryable()
        );
        assert!(!Error::Cancelled(Interruption::Cancelled).is_retryable());
    }

    #[test]
    fn test_retry_error_conversion() {
        let err = Error::from(declarative::RetryError::Exhausted {
            attempts: 3,
            last: not_found(),
        });
        assert!(matches!(err, Error::RetryExhausted { attempts: 3, .. }));
        assert_eq!(err.category(), ErrorCategory::Remote);

        let err = Error::from(declarative::RetryError::<Error>::Interrupted {
            attempts: 1,
            reason: Interruption::DeadlineExceeded,
        });
        assert!(matches!(err, Error::Cancelled(Interruption::DeadlineExceeded)));
    }

    #[test]
    fn test_category_advice() {
        let err = Error::StateUnknown {
            id: "10105".into(),
            source: Box::new(not_found()),
        };
        assert_eq!(err.category(), ErrorCategory::Unknown);
        assert!(err.category().advice().contains("refresh"));
    }
}
