//! # Declarative
//!
//! A framework for reconciling declared attribute sets against remote
//! objects.
//!
//! This crate provides the kind-independent machinery: the attribute model,
//! one-pass validation, diagnostics aggregation, bounded retry, cancellation
//! and the lifecycle of a tracked instance. Knowledge about any particular
//! remote API lives in the [`Resource`] implementations built on top.
//!
//! ## Core Concepts
//!
//! - **AttributeSet**: The declarative description of one instance
//! - **AttributeReader**: Parses an attribute set, collecting every violation
//! - **Diagnostics**: Field errors and warnings that do not abort an operation
//! - **Resource**: Create/Read/Update/Delete for one kind of remote object
//! - **with_retry**: Bounded retry with backoff, aware of cancellation
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{AttributeReader, AttributeSet};
//!
//! let attrs = AttributeSet::new().with("host", "web01");
//! let mut reader = AttributeReader::new(&attrs);
//! let host = reader.string("host");
//! let port = reader.string_or("port", "10050");
//! let request = reader.finish((host, port))?;
//! ```

pub mod attributes;
pub mod context;
pub mod diagnostics;
pub mod diff;
pub mod executor;
pub mod parse;
pub mod resource;
pub mod retry;
pub mod types;

// Re-export main types at crate root
pub use attributes::{AttributeSet, AttributeValue};
pub use context::{CancellationToken, Interruption, OperationContext};
pub use diagnostics::{Diagnostic, Diagnostics, Severity, StateWriter};
pub use diff::{AttributeDiff, has_change};
pub use executor::{ExecuteError, execute};
pub use parse::{AttributeReader, InvalidConfiguration, Violation};
pub use resource::{BoxedResource, Resource};
pub use retry::{LogCallback, RetryCallback, RetryConfig, RetryError, Retryable, with_retry};
pub use types::{Applied, ApplyResult, ExecuteSummary, Lifecycle, LifecycleError};
