//! Dynamically-typed attribute sets
//!
//! An [`AttributeSet`] is the declarative description of one resource
//! instance: a map from attribute name to an [`AttributeValue`]. Values keep
//! track of whether a collection is ordered ([`AttributeValue::List`]) or
//! order-free ([`AttributeValue::Set`]) so that comparisons respect the
//! semantics of each attribute instead of assuming one rule for all.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum AttributeValue {
    /// Explicitly unset
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    /// Ordered collection; position is significant
    List(Vec<AttributeValue>),
    /// Order-free collection; duplicates collapse
    Set(BTreeSet<AttributeValue>),
    /// Nested block
    Map(AttributeSet),
}

impl AttributeValue {
    /// Build an ordered list
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build an order-free set
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Name of the value's type, used in validation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "block",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&AttributeSet> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Elements of a list or set, in iteration order
    pub fn elements(&self) -> Option<Vec<&Self>> {
        match self {
            Self::List(items) => Some(items.iter().collect()),
            Self::Set(items) => Some(items.iter().collect()),
            _ => None,
        }
    }

    /// Semantic equality
    ///
    /// Identical to `==` except that a set compared against a list (or
    /// another set) ignores element order and duplicates. Files on disk
    /// only carry arrays, so a set read back from state arrives as a list.
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Set(_), _) | (_, Self::Set(_)) => {
                match (self.elements(), other.elements()) {
                    (Some(a), Some(b)) => {
                        let a: BTreeSet<&Self> = a.into_iter().collect();
                        let b: BTreeSet<&Self> = b.into_iter().collect();
                        a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.equivalent(y)))
                    }
                    _ => false,
                }
            }
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equivalent(y))
            }
            (Self::Map(a), Self::Map(b)) => a.equivalent(b),
            _ => self == other,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self))
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for AttributeValue {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<AttributeSet> for AttributeValue {
    fn from(m: AttributeSet) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Self>> From<Option<T>> for AttributeValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for AttributeValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::String(n.to_string()), Self::Int),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&AttributeValue> for serde_json::Value {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Null => Self::Null,
            AttributeValue::Bool(b) => Self::Bool(*b),
            AttributeValue::Int(i) => Self::from(*i),
            AttributeValue::String(s) => Self::String(s.clone()),
            AttributeValue::List(items) => Self::Array(items.iter().map(Self::from).collect()),
            AttributeValue::Set(items) => Self::Array(items.iter().map(Self::from).collect()),
            AttributeValue::Map(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

/// Attribute name to value mapping for one resource instance
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(BTreeMap<String, AttributeValue>);

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Get a string attribute
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.0.remove(name)
    }

    /// Whether the attribute is present and not null
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Semantic equality, see [`AttributeValue::equivalent`]
    pub fn equivalent(&self, other: &Self) -> bool {
        let null = AttributeValue::Null;
        self.keys()
            .chain(other.keys())
            .all(|k| {
                self.get(k)
                    .unwrap_or(&null)
                    .equivalent(other.get(k).unwrap_or(&null))
            })
    }
}

impl FromIterator<(String, AttributeValue)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for AttributeSet {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter()
            .map(|(k, v)| (k, AttributeValue::from(v)))
            .collect()
    }
}
