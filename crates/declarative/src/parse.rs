//! One-pass attribute parsing
//!
//! [`AttributeReader`] pulls typed values out of an [`AttributeSet`] and,
//! instead of stopping at the first problem, records every violation it
//! finds. Callers build their typed request in one pass and call
//! [`AttributeReader::finish`] to get either the request or the complete
//! list of problems.

use crate::attributes::{AttributeSet, AttributeValue};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted attribute path, e.g. `interfaces[0].snmp_config`
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found while parsing one attribute set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {}", join(.violations))]
pub struct InvalidConfiguration {
    pub violations: Vec<Violation>,
}

impl InvalidConfiguration {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation {
                path: path.into(),
                message: message.into(),
            }],
        }
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

struct Scope<'a> {
    path: String,
    attrs: &'a AttributeSet,
}

/// Typed reader over an attribute set that collects violations
pub struct AttributeReader<'a> {
    root: &'a AttributeSet,
    scopes: Vec<Scope<'a>>,
    violations: Vec<Violation>,
}

impl<'a> AttributeReader<'a> {
    pub fn new(attrs: &'a AttributeSet) -> Self {
        Self {
            root: attrs,
            scopes: Vec::new(),
            violations: Vec::new(),
        }
    }

    fn current(&self) -> &'a AttributeSet {
        self.scopes.last().map_or(self.root, |s| s.attrs)
    }

    fn path_of(&self, name: &str) -> String {
        let base = self.scopes.last().map_or("", |s| s.path.as_str());
        if base.is_empty() {
            name.to_string()
        } else {
            format!("{base}.{name}")
        }
    }

    fn lookup(&self, name: &str) -> Option<&'a AttributeValue> {
        self.current().get(name).filter(|v| !v.is_null())
    }

    fn type_mismatch(&mut self, name: &str, expected: &str, found: &AttributeValue) {
        self.violation_at(name, format!("expected {expected}, found {}", found.type_name()));
    }

    /// Record a violation at the current block
    pub fn violation(&mut self, message: impl Into<String>) {
        let path = self
            .scopes
            .last()
            .map(|s| s.path.clone())
            .unwrap_or_default();
        self.violations.push(Violation {
            path,
            message: message.into(),
        });
    }

    /// Record a violation against an attribute of the current block
    pub fn violation_at(&mut self, name: &str, message: impl Into<String>) {
        let path = self.path_of(name);
        self.violations.push(Violation {
            path,
            message: message.into(),
        });
    }

    /// Whether the attribute is present and not null
    pub fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Attribute set of the current block
    #[must_use]
    pub fn attributes(&self) -> &'a AttributeSet {
        self.current()
    }

    /// Required string attribute
    pub fn string(&mut self, name: &str) -> String {
        if self.lookup(name).is_none() {
            self.violation_at(name, "missing required attribute");
            return String::new();
        }
        self.opt_string(name).unwrap_or_default()
    }

    pub fn opt_string(&mut self, name: &str) -> Option<String> {
        match self.lookup(name)? {
            AttributeValue::String(s) => Some(s.clone()),
            AttributeValue::Int(i) => Some(i.to_string()),
            other => {
                self.type_mismatch(name, "string", other);
                None
            }
        }
    }

    pub fn string_or(&mut self, name: &str, default: &str) -> String {
        self.opt_string(name)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn opt_bool(&mut self, name: &str) -> Option<bool> {
        match self.lookup(name)? {
            AttributeValue::Bool(b) => Some(*b),
            other => {
                self.type_mismatch(name, "bool", other);
                None
            }
        }
    }

    pub fn bool_or(&mut self, name: &str, default: bool) -> bool {
        self.opt_bool(name).unwrap_or(default)
    }

    /// Optional integer; numeric strings are accepted
    pub fn opt_int(&mut self, name: &str) -> Option<i64> {
        match self.lookup(name)? {
            AttributeValue::Int(i) => Some(*i),
            AttributeValue::String(s) => {
                if let Ok(i) = s.trim().parse() {
                    Some(i)
                } else {
                    self.violation_at(name, format!("expected integer, found \"{s}\""));
                    None
                }
            }
            other => {
                self.type_mismatch(name, "integer", other);
                None
            }
        }
    }

    pub fn int_or(&mut self, name: &str, default: i64) -> i64 {
        self.opt_int(name).unwrap_or(default)
    }

    /// List or set of strings; absent means empty
    pub fn strings(&mut self, name: &str) -> Vec<String> {
        let Some(value) = self.lookup(name) else {
            return Vec::new();
        };
        let Some(elements) = value.elements() else {
            self.type_mismatch(name, "list", value);
            return Vec::new();
        };

        let mut out = Vec::with_capacity(elements.len());
        for (i, element) in elements.into_iter().enumerate() {
            match element {
                AttributeValue::String(s) => out.push(s.clone()),
                AttributeValue::Int(n) => out.push(n.to_string()),
                other => {
                    let at = format!("{name}[{i}]");
                    self.type_mismatch(&at, "string", other);
                }
            }
        }
        out
    }

    /// Map of string values; absent means empty
    pub fn string_map(&mut self, name: &str) -> BTreeMap<String, String> {
        let Some(value) = self.lookup(name) else {
            return BTreeMap::new();
        };
        let Some(map) = value.as_map() else {
            self.type_mismatch(name, "map", value);
            return BTreeMap::new();
        };

        let mut out = BTreeMap::new();
        for (key, v) in map {
            match v {
                AttributeValue::String(s) => {
                    out.insert(key.clone(), s.clone());
                }
                other => {
                    let at = format!("{name}.{key}");
                    self.type_mismatch(&at, "string", other);
                }
            }
        }
        out
    }

    fn within<T>(&mut self, path: String, attrs: &'a AttributeSet, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push(Scope { path, attrs });
        let out = f(self);
        self.scopes.pop();
        out
    }

    /// Parse every block of a repeated nested attribute
    ///
    /// Elements that are not blocks are reported and skipped. The closure
    /// returns `None` for elements it could not build.
    pub fn each<T>(&mut self, name: &str, mut f: impl FnMut(&mut Self) -> Option<T>) -> Vec<T> {
        let Some(value) = self.lookup(name) else {
            return Vec::new();
        };
        let Some(elements) = value.elements() else {
            self.type_mismatch(name, "list of blocks", value);
            return Vec::new();
        };

        let mut out = Vec::with_capacity(elements.len());
        for (i, element) in elements.into_iter().enumerate() {
            let path = self.path_of(&format!("{name}[{i}]"));
            match element {
                AttributeValue::Map(attrs) => {
                    if let Some(item) = self.within(path, attrs, &mut f) {
                        out.push(item);
                    }
                }
                other => {
                    self.type_mismatch(&format!("{name}[{i}]"), "block", other);
                }
            }
        }
        out
    }

    /// Parse a single nested block
    ///
    /// Accepts either a block or a list/set holding at most one block.
    pub fn block<T>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        let value = self.lookup(name)?;
        let attrs = match value {
            AttributeValue::Map(attrs) => attrs,
            AttributeValue::List(_) | AttributeValue::Set(_) => {
                let elements = value.elements().unwrap_or_default();
                match elements.as_slice() {
                    [] => return None,
                    [only] => match *only {
                        AttributeValue::Map(attrs) => attrs,
                        other => {
                            self.type_mismatch(name, "block", other);
                            return None;
                        }
                    },
                    _ => {
                        self.violation_at(name, format!("at most one block allowed, found {}", elements.len()));
                        return None;
                    }
                }
            }
            other => {
                self.type_mismatch(name, "block", other);
                return None;
            }
        };
        let path = self.path_of(name);
        Some(self.within(path, attrs, f))
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Return `value` if no violations were recorded
    pub fn finish<T>(self, value: T) -> Result<T, InvalidConfiguration> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(InvalidConfiguration {
                violations: self.violations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interface(ip: &str, dns: &str) -> AttributeValue {
        AttributeSet::new().with("ip", ip).with("dns", dns).into()
    }

    #[test]
    fn test_reads_typed_values() {
        let attrs = AttributeSet::new()
            .with("host", "web01")
            .with("monitored", false)
            .with("inventory_mode", "1")
            .with("groups", AttributeValue::set(["4", "2"]));

        let mut r = AttributeReader::new(&attrs);
        let host = r.string("host");
        let monitored = r.bool_or("monitored", true);
        let inventory = r.int_or("inventory_mode", -1);
        let groups = r.strings("groups");
        let port = r.string_or("port", "10050");

        assert!(r.is_valid());
        assert_eq!(host, "web01");
        assert!(!monitored);
        assert_eq!(inventory, 1);
        assert_eq!(groups, vec!["2", "4"]);
        assert_eq!(port, "10050");
    }

    #[test]
    fn test_collects_every_violation() {
        let attrs = AttributeSet::new()
            .with("monitored", "yes")
            .with("inventory_mode", "manual");

        let mut r = AttributeReader::new(&attrs);
        r.string("host");
        r.bool_or("monitored", true);
        r.int_or("inventory_mode", 0);

        let err = r.finish(()).unwrap_err();
        let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["host", "monitored", "inventory_mode"]);
    }

    #[test]
    fn test_nested_paths() {
        let attrs = AttributeSet::new().with(
            "interfaces",
            AttributeValue::list([interface("10.0.0.1", ""), interface("", "")]),
        );

        let mut r = AttributeReader::new(&attrs);
        let ips = r.each("interfaces", |r| {
            let ip = r.string_or("ip", "");
            let dns = r.string_or("dns", "");
            if ip.is_empty() && dns.is_empty() {
                r.violation("one of ip or dns is required");
                return None;
            }
            Some(ip)
        });

        assert_eq!(ips, vec!["10.0.0.1"]);
        let err = r.finish(ips).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].path, "interfaces[1]");
    }

    #[test]
    fn test_block_accepts_single_element_list() {
        let snmp = AttributeSet::new().with("version", "2");
        let attrs = AttributeSet::new().with("snmp_config", AttributeValue::list([snmp]));

        let mut r = AttributeReader::new(&attrs);
        let version = r.block("snmp_config", |r| r.string("version"));
        assert_eq!(version.as_deref(), Some("2"));
        assert!(r.is_valid());
    }

    #[test]
    fn test_block_rejects_two_elements() {
        let one = AttributeSet::new().with("version", "2");
        let two = AttributeSet::new().with("version", "3");
        let attrs = AttributeSet::new().with("snmp_config", AttributeValue::list([one, two]));

        let mut r = AttributeReader::new(&attrs);
        assert!(r.block("snmp_config", |r| r.string("version")).is_none());
        assert!(!r.is_valid());
    }

    #[test]
    fn test_message_lists_all_problems() {
        let attrs = AttributeSet::new();
        let mut r = AttributeReader::new(&attrs);
        r.string("name");
        r.string("key");
        let err = r.finish(()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: name: missing required attribute; key: missing required attribute"
        );
    }
}
