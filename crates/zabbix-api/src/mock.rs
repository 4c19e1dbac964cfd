//! Scripted transport for tests.
//!
//! Replies are served either from a queue, in call order, or computed by a
//! handler closure. Every call is recorded so tests can assert on methods
//! and parameters.

use crate::error::{Error, Result};
use crate::transport::Transport;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

type Handler = Box<dyn Fn(&str, &Value) -> Result<Value> + Send + Sync>;

/// One call seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
    pub timeout: Option<Duration>,
}

/// Transport that answers from a script instead of the network
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value>>>,
    handler: Option<Handler>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    /// Answer calls with `replies`, in order
    #[must_use]
    pub fn with_replies(replies: Vec<Result<Value>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    /// Answer calls by invoking `handler` with the method and parameters
    #[must_use]
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
            ..Default::default()
        }
    }

    /// Calls made so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Methods called so far, in order
    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    /// Number of calls to `method`
    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }
}

impl Transport for ScriptedTransport {
    fn call(&self, method: &str, params: Value, timeout: Option<Duration>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method: method.to_string(),
                params: params.clone(),
                timeout,
            });

        if let Some(handler) = &self.handler {
            return handler(method, &params);
        }

        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(Error::InvalidResponse {
                    method: method.to_string(),
                    message: "no scripted reply left".to_string(),
                })
            })
    }
}
