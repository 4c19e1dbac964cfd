//! Typed API client.
//!
//! [`ZabbixClient`] wraps a shared [`Transport`] and knows the calling
//! conventions of the management API: `<object>.get` returns an array,
//! mutations return `{"<object>ids": [...]}`, settings objects are read and
//! updated as a whole.

use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::transport::Transport;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Client shared by every resource operation.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct ZabbixClient {
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
}

impl ZabbixClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            timeout: None,
        }
    }

    /// Copy of this client whose requests time out after `timeout`.
    #[must_use]
    pub fn with_timeout(&self, timeout: Option<Duration>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            timeout,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Raw call.
    pub fn call(&self, method: &str, params: Value) -> Result<Value> {
        log::debug!("-> {method} {params}");
        let result = self.transport.call(method, params, self.timeout)?;
        log::trace!("<- {method} {result}");
        Ok(result)
    }

    /// `<kind>.get` with arbitrary parameters.
    pub fn get<T: DeserializeOwned>(&self, kind: ObjectKind, params: Value) -> Result<Vec<T>> {
        let method = kind.method("get");
        let result = self.call(&method, params)?;
        decode(&method, result)
    }

    /// Fetch exactly one object by id.
    ///
    /// `extra` is merged into the parameters (output, select options). An
    /// empty result is reported as [`Error::NotFound`].
    pub fn get_one<T: DeserializeOwned>(&self, kind: ObjectKind, id: &str, extra: Value) -> Result<T> {
        let mut params = match extra {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        params
            .entry("output")
            .or_insert_with(|| Value::String("extend".to_string()));
        params.insert(kind.ids_key(), json!([id]));

        let mut objects: Vec<T> = self.get(kind, Value::Object(params))?;
        match objects.len() {
            0 => Err(Error::NotFound {
                kind: kind.api_name().to_string(),
                id: id.to_string(),
            }),
            1 => Ok(objects.remove(0)),
            n => Err(Error::InvalidResponse {
                method: kind.method("get"),
                message: format!("expected one {kind} for id {id}, got {n}"),
            }),
        }
    }

    /// Objects whose `field` equals `value` exactly.
    pub fn find_by<T: DeserializeOwned>(&self, kind: ObjectKind, field: &str, value: &str) -> Result<Vec<T>> {
        let mut filter = Map::new();
        filter.insert(field.to_string(), json!([value]));
        self.get(
            kind,
            json!({
                "output": "extend",
                "filter": filter,
            }),
        )
    }

    /// `<kind>.create`, returning the new id.
    pub fn create<P: Serialize>(&self, kind: ObjectKind, object: &P) -> Result<String> {
        let method = kind.method("create");
        let result = self.call(&method, serde_json::to_value(object)?)?;
        first_id(kind, &method, &result)
    }

    /// `<kind>.update`, returning the updated id.
    pub fn update<P: Serialize>(&self, kind: ObjectKind, object: &P) -> Result<String> {
        let method = kind.method("update");
        let result = self.call(&method, serde_json::to_value(object)?)?;
        first_id(kind, &method, &result)
    }

    /// `<kind>.delete` for the given ids.
    pub fn delete(&self, kind: ObjectKind, ids: &[String]) -> Result<Vec<String>> {
        let method = kind.method("delete");
        let result = self.call(&method, json!(ids))?;
        ids_in(kind, &method, &result)
    }

    /// Read a settings singleton.
    pub fn settings_get(&self, kind: ObjectKind) -> Result<Map<String, Value>> {
        let method = kind.method("get");
        match self.call(&method, json!({"output": "extend"}))? {
            Value::Object(map) => Ok(map),
            other => Err(Error::InvalidResponse {
                method,
                message: format!("expected an object, got {other}"),
            }),
        }
    }

    /// Update fields of a settings singleton.
    pub fn settings_update(&self, kind: ObjectKind, fields: &Map<String, Value>) -> Result<()> {
        let method = kind.method("update");
        self.call(&method, Value::Object(fields.clone()))?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(method: &str, result: Value) -> Result<Vec<T>> {
    if !result.is_array() {
        return Err(Error::InvalidResponse {
            method: method.to_string(),
            message: "expected an array".to_string(),
        });
    }
    Ok(serde_json::from_value(result)?)
}

fn ids_in(kind: ObjectKind, method: &str, result: &Value) -> Result<Vec<String>> {
    let key = kind.ids_key();
    let ids = result
        .get(&key)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidResponse {
            method: method.to_string(),
            message: format!("missing {key}"),
        })?;

    Ok(ids
        .iter()
        .map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

fn first_id(kind: ObjectKind, method: &str, result: &Value) -> Result<String> {
    ids_in(kind, method, result)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidResponse {
            method: method.to_string(),
            message: format!("empty {}", kind.ids_key()),
        })
}
