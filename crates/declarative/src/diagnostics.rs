//! Diagnostics aggregation
//!
//! Populating a resource's state from a remote object is a sequence of
//! independent field steps. A failing step must not prevent the others from
//! running, so results are recorded into a [`Diagnostics`] batch instead of
//! being propagated with `?`.

use crate::attributes::{AttributeSet, AttributeValue};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One reported problem or notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    /// Attribute the diagnostic is about, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attr) => write!(f, "{}: {attr}: {}", self.severity, self.summary),
            None => write!(f, "{}: {}", self.severity, self.summary),
        }
    }
}

/// Ordered batch of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one field step; `Ok` adds nothing
    pub fn record<T, E: fmt::Display>(&mut self, attribute: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(Diagnostic {
                    severity: Severity::Error,
                    summary: e.to_string(),
                    attribute: Some(attribute.to_string()),
                });
                None
            }
        }
    }

    pub fn error(&mut self, summary: impl Into<String>) {
        self.0.push(Diagnostic {
            severity: Severity::Error,
            summary: summary.into(),
            attribute: None,
        });
    }

    pub fn warning(&mut self, summary: impl Into<String>) {
        self.0.push(Diagnostic {
            severity: Severity::Warning,
            summary: summary.into(),
            attribute: None,
        });
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.0.iter().filter(|d| d.severity == Severity::Error).count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("; "))
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Builds a declarative state field by field
///
/// Every `set`/`try_set` call runs regardless of earlier failures; failed
/// fields are left out of the state and reported in the diagnostics.
#[derive(Debug, Default)]
pub struct StateWriter {
    state: AttributeSet,
    diagnostics: Diagnostics,
}

impl StateWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<AttributeValue>) {
        self.state.insert(name, value);
    }

    /// Set a field from a fallible conversion
    pub fn try_set<V, E>(&mut self, name: &str, value: Result<V, E>)
    where
        V: Into<AttributeValue>,
        E: fmt::Display,
    {
        if let Some(v) = self.diagnostics.record(name, value) {
            self.state.insert(name, v);
        }
    }

    pub fn warning(&mut self, summary: impl Into<String>) {
        self.diagnostics.warning(summary);
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn finish(self) -> (AttributeSet, Diagnostics) {
        (self.state, self.diagnostics)
    }
}
