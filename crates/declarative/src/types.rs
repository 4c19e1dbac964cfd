//! Core types for declarative resource management

use crate::attributes::AttributeSet;
use crate::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lifecycle of one tracked resource instance
///
/// ```text
/// Absent -> Creating -> Created -> (Updating -> Created)* -> Deleting -> Absent
/// ```
///
/// A mutation whose follow-up read failed leaves the instance `Unknown`; it
/// has to be refreshed before it can be updated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Absent,
    Creating,
    Created,
    Updating,
    Deleting,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid lifecycle transition from {from} to {to}")]
pub struct LifecycleError {
    pub from: Lifecycle,
    pub to: Lifecycle,
}

impl Lifecycle {
    /// Whether moving to `to` is a legal step
    pub fn can_transition(self, to: Self) -> bool {
        use Lifecycle::{Absent, Created, Creating, Deleting, Unknown, Updating};
        matches!(
            (self, to),
            (Absent, Creating)
                | (Creating, Created | Unknown | Absent)
                | (Created, Updating | Deleting | Created)
                | (Updating, Created | Unknown)
                | (Deleting, Absent | Created | Unknown)
                | (Unknown, Created | Deleting | Absent)
        )
    }

    pub fn transition(self, to: Self) -> Result<Self, LifecycleError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(LifecycleError { from: self, to })
        }
    }

    /// Whether the instance must be read before it can be updated
    pub fn needs_refresh(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Absent => "absent",
            Self::Creating => "creating",
            Self::Created => "created",
            Self::Updating => "updating",
            Self::Deleting => "deleting",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a successful create, read or update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// Remote object id
    pub id: String,
    /// Normalized declarative state
    pub state: AttributeSet,
    /// Field errors and warnings collected while building `state`
    pub diagnostics: Diagnostics,
}

/// Result of applying one resource instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyResult {
    /// Desired state already matches
    NoChange,
    Created,
    Updated,
    Refreshed,
    Deleted,
    /// Local tracking dropped without a remote delete
    Forgotten,
    /// The mutation happened but the follow-up read failed
    Unknown { error: String },
    Failed { error: String },
}

impl ApplyResult {
    /// Check if the result represents success (no failure)
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. } | Self::Unknown { .. })
    }

    /// Check if the result represents a change
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Created | Self::Updated | Self::Deleted)
    }
}

/// Summary of execution results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecuteSummary {
    pub created: usize,
    pub updated: usize,
    pub refreshed: usize,
    pub deleted: usize,
    pub forgotten: usize,
    pub unknown: usize,
    pub failed: usize,
    pub no_change: usize,
}

impl ExecuteSummary {
    /// Total number of actual changes made
    pub fn total_changes(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    /// Check if execution was fully successful
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.unknown == 0
    }

    /// Total number of instances processed
    pub fn total(&self) -> usize {
        self.created
            + self.updated
            + self.refreshed
            + self.deleted
            + self.forgotten
            + self.unknown
            + self.failed
            + self.no_change
    }

    /// Merge another summary into this one
    pub fn merge(&mut self, other: &Self) {
        self.created += other.created;
        self.updated += other.updated;
        self.refreshed += other.refreshed;
        self.deleted += other.deleted;
        self.forgotten += other.forgotten;
        self.unknown += other.unknown;
        self.failed += other.failed;
        self.no_change += other.no_change;
    }

    /// Add a result to the summary
    pub fn add_result(&mut self, result: &ApplyResult) {
        match result {
            ApplyResult::NoChange => self.no_change += 1,
            ApplyResult::Created => self.created += 1,
            ApplyResult::Updated => self.updated += 1,
            ApplyResult::Refreshed => self.refreshed += 1,
            ApplyResult::Deleted => self.deleted += 1,
            ApplyResult::Forgotten => self.forgotten += 1,
            ApplyResult::Unknown { .. } => self.unknown += 1,
            ApplyResult::Failed { .. } => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_lifecycle() {
        let mut state = Lifecycle::Absent;
        for next in [
            Lifecycle::Creating,
            Lifecycle::Created,
            Lifecycle::Updating,
            Lifecycle::Created,
            Lifecycle::Deleting,
            Lifecycle::Absent,
        ] {
            state = state.transition(next).unwrap();
        }
        assert_eq!(state, Lifecycle::Absent);
    }

    #[test]
    fn test_failed_read_after_update_is_unknown() {
        let state = Lifecycle::Updating.transition(Lifecycle::Unknown).unwrap();
        assert!(state.needs_refresh());
        assert!(!state.can_transition(Lifecycle::Updating));
        assert!(state.can_transition(Lifecycle::Created));
    }

    #[test]
    fn test_cannot_update_absent() {
        let err = Lifecycle::Absent.transition(Lifecycle::Updating).unwrap_err();
        assert_eq!(err.to_string(), "invalid lifecycle transition from absent to updating");
    }

    #[test]
    fn test_summary() {
        let mut summary = ExecuteSummary::default();
        summary.add_result(&ApplyResult::Created);
        summary.add_result(&ApplyResult::NoChange);
        summary.add_result(&ApplyResult::Unknown {
            error: "read failed".into(),
        });

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.total_changes(), 1);
        assert!(!summary.is_success());

        let mut other = ExecuteSummary::default();
        other.add_result(&ApplyResult::Deleted);
        summary.merge(&other);
        assert_eq!(summary.total_changes(), 2);
    }
}
