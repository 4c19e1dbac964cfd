//! JSON-RPC transport.
//!
//! The [`Transport`] trait is the single seam between the client and the
//! network. [`HttpTransport`] posts JSON-RPC 2.0 requests to
//! `<url>/api_jsonrpc.php`; tests substitute a scripted transport.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Path of the JSON-RPC endpoint below the frontend URL.
const ENDPOINT: &str = "api_jsonrpc.php";

/// Performs one JSON-RPC call.
///
/// Implementations must be usable from several threads at once.
pub trait Transport: Send + Sync {
    /// Call `method` with `params` and return the `result` member.
    ///
    /// `timeout` bounds the whole request when set.
    fn call(&self, method: &str, params: Value, timeout: Option<Duration>) -> Result<Value>;
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: String,
}

impl RpcResponse {
    fn into_result(self, method: &str) -> Result<Value> {
        if let Some(err) = self.error {
            return Err(Error::Rpc {
                method: method.to_string(),
                code: err.code,
                message: err.message,
                data: err.data,
            });
        }
        self.result.ok_or_else(|| Error::InvalidResponse {
            method: method.to_string(),
            message: "response has neither result nor error".to_string(),
        })
    }
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// Full endpoint URL.
    endpoint: String,
    /// API token sent as a bearer credential.
    token: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Create a transport for the frontend at `url`.
    ///
    /// `url` may point at the frontend root or directly at
    /// `api_jsonrpc.php`.
    #[must_use]
    pub fn new(url: &str, token: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            endpoint: endpoint_for(url),
            token: token.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Get the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn call(&self, method: &str, params: Value, timeout: Option<Duration>) -> Result<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        let response: RpcResponse = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json-rpc")
            .header("Authorization", &format!("Bearer {}", self.token))
            .config()
            .timeout_global(timeout)
            .build()
            .send_json(&request)?
            .body_mut()
            .read_json()?;

        response.into_result(method)
    }
}

fn endpoint_for(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with(ENDPOINT) {
        trimmed.to_string()
    } else {
        format!("{trimmed}/{ENDPOINT}")
    }
}
