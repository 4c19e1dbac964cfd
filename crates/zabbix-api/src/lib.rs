//! # Zabbix API
//!
//! Blocking client for the Zabbix JSON-RPC management API.
//!
//! - [`Transport`] sends one JSON-RPC call; [`HttpTransport`] does it over
//!   HTTP with a bearer token.
//! - [`ZabbixClient`] adds the API's conventions on top: typed `get`,
//!   id extraction from mutation results, settings singletons.
//! - [`objects`] holds the typed request/response objects.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zabbix_api::{HttpTransport, ObjectKind, ZabbixClient};
//! use zabbix_api::objects::host::HostRef;
//!
//! let transport = HttpTransport::new("https://zabbix.example.com", "token");
//! let client = ZabbixClient::new(Arc::new(transport));
//! let hosts: Vec<HostRef> = client.find_by(ObjectKind::Host, "host", "web01").unwrap();
//! ```

pub mod client;
pub mod error;
pub mod kind;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod objects;
pub mod transport;

pub use client::ZabbixClient;
pub use error::{Error, ErrorCategory, Result};
pub use kind::{ObjectKind, RemoteObjectRef};
pub use transport::{HttpTransport, Transport};
