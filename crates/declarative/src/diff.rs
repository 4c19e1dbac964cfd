//! Diff computation between attribute sets

use crate::attributes::{AttributeSet, AttributeValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attribute-level difference between a prior and a desired state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDiff {
    /// Set in `new`, unset in `old`
    pub added: Vec<String>,
    /// Set in `old`, unset in `new`
    pub removed: Vec<String>,
    /// Set in both with different values
    pub changed: Vec<String>,
}

impl AttributeDiff {
    /// Compare two attribute sets, ignoring `ignore` keys
    ///
    /// Values are compared with [`AttributeValue::equivalent`], so a set
    /// whose order changed is not reported.
    pub fn between(old: &AttributeSet, new: &AttributeSet, ignore: &[&str]) -> Self {
        let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
        let mut diff = Self::default();

        for key in keys {
            if ignore.contains(&key.as_str()) {
                continue;
            }
            let before = old.get(key).filter(|v| !v.is_null());
            let after = new.get(key).filter(|v| !v.is_null());
            match (before, after) {
                (None, Some(_)) => diff.added.push(key.clone()),
                (Some(_), None) => diff.removed.push(key.clone()),
                (Some(a), Some(b)) if !a.equivalent(b) => diff.changed.push(key.clone()),
                _ => {}
            }
        }
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Whether the named attribute differs in any way
    pub fn touches(&self, name: &str) -> bool {
        self.added
            .iter()
            .chain(&self.removed)
            .chain(&self.changed)
            .any(|k| k == name)
    }

    /// Total number of differing attributes
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// Whether a single attribute differs between two sets
pub fn has_change(old: &AttributeSet, new: &AttributeSet, name: &str) -> bool {
    let null = AttributeValue::Null;
    !old.get(name)
        .unwrap_or(&null)
        .equivalent(new.get(name).unwrap_or(&null))
}
