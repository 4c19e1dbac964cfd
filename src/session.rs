//! Provider handle and per-operation session
//!
//! A [`Provider`] is built once per command from the config and shared by
//! every resource. A [`Session`] pairs it with the [`OperationContext`] of
//! one operation so sub-queries inherit cancellation and the remaining
//! deadline.

use crate::enums::UnknownTokenPolicy;
use crate::error::Result;
use declarative::{OperationContext, RetryConfig};
use zabbix_api::ZabbixClient;

/// Shared API client plus the policies every operation runs under
#[derive(Clone)]
pub struct Provider {
    pub client: ZabbixClient,
    pub retry: RetryConfig,
    pub enum_policy: UnknownTokenPolicy,
}

impl Provider {
    pub fn new(client: ZabbixClient) -> Self {
        Self {
            client,
            retry: RetryConfig::default(),
            enum_policy: UnknownTokenPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_enum_policy(mut self, policy: UnknownTokenPolicy) -> Self {
        self.enum_policy = policy;
        self
    }

    pub fn session<'a>(&'a self, ctx: &'a OperationContext) -> Session<'a> {
        Session { provider: self, ctx }
    }
}

/// One operation's view of the provider
#[derive(Clone, Copy)]
pub struct Session<'a> {
    pub provider: &'a Provider,
    pub ctx: &'a OperationContext,
}

impl Session<'_> {
    /// Client for the next remote call
    ///
    /// Fails if the operation was cancelled or its deadline passed. When a
    /// deadline is set, the time left becomes the request timeout, capped by
    /// the client's own timeout.
    pub fn api(&self) -> Result<ZabbixClient> {
        self.ctx.check()?;
        let client = &self.provider.client;
        let timeout = match (self.ctx.remaining(), client.timeout()) {
            (Some(left), Some(own)) => Some(left.min(own)),
            (left, own) => left.or(own),
        };
        Ok(client.with_timeout(timeout))
    }

    pub fn retry(&self) -> &RetryConfig {
        &self.provider.retry
    }

    pub fn enum_policy(&self) -> UnknownTokenPolicy {
        self.provider.enum_policy
    }
}
