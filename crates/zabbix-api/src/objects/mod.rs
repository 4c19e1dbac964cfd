//! Typed remote objects.
//!
//! The API encodes most numbers as JSON strings (`"status": "0"`) and
//! sometimes answers with real numbers. The [`string_int`] helpers accept
//! either and always send strings.

pub mod dashboard;
pub mod graph;
pub mod host;
pub mod item;
pub mod mediatype;
pub mod proxy;
pub mod trigger;
pub mod user;
pub mod valuemap;

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInt {
    Int(i64),
    Str(String),
}

impl RawInt {
    fn parse<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Int(i) => Ok(i),
            Self::Str(s) if s.is_empty() => Ok(0),
            Self::Str(s) => s
                .parse()
                .map_err(|_| E::custom(format!("invalid integer string \"{s}\""))),
        }
    }
}

/// `i64` encoded as a JSON string.
pub mod string_int {
    use super::{Deserialize, Deserializer, RawInt, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        RawInt::deserialize(deserializer)?.parse()
    }
}

/// `Option<i64>` encoded as a JSON string.
pub mod opt_string_int {
    use super::{Deserialize, Deserializer, RawInt, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Option::<RawInt>::deserialize(deserializer)?
            .map(RawInt::parse)
            .transpose()
    }
}

/// Deserialize a value that is an object when present and an empty array
/// or null when absent.
///
/// An empty object still counts as present.
pub fn object_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        #[serde(with = "string_int")]
        status: i64,
        #[serde(with = "opt_string_int", default, skip_serializing_if = "Option::is_none")]
        port: Option<i64>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Details {
        #[serde(default)]
        community: String,
    }

    #[derive(Debug, Deserialize)]
    struct WithDetails {
        #[serde(default, deserialize_with = "object_or_none")]
        details: Option<Details>,
    }

    #[test]
    fn test_string_int_accepts_both_forms() {
        let a: Sample = serde_json::from_value(json!({"status": "1", "port": 25})).unwrap();
        let b: Sample = serde_json::from_value(json!({"status": 1, "port": "25"})).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_value(&a).unwrap(), json!({"status": "1", "port": "25"}));
    }

    #[test]
    fn test_string_int_rejects_text() {
        assert!(serde_json::from_value::<Sample>(json!({"status": "on"})).is_err());
    }

    #[test]
    fn test_details_presence() {
        let absent: WithDetails = serde_json::from_value(json!({"details": []})).unwrap();
        assert!(absent.details.is_none());

        let missing: WithDetails = serde_json::from_value(json!({})).unwrap();
        assert!(missing.details.is_none());

        let empty: WithDetails = serde_json::from_value(json!({"details": {}})).unwrap();
        assert_eq!(empty.details, Some(Details { community: String::new() }));
    }
}
