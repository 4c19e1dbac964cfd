use super::host::HostRef;
use super::{object_or_none, string_int};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Proxy {
    #[serde(rename = "proxyid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Proxy name
    pub host: String,
    /// 5 active, 6 passive
    #[serde(with = "string_int", default)]
    pub status: i64,
    #[serde(default)]
    pub description: String,
    /// Comma-separated addresses active proxies may connect from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub proxy_address: String,
    #[serde(default)]
    pub hosts: Vec<HostRef>,
    /// Passive proxy interface; an empty array on the wire means none
    #[serde(default, deserialize_with = "object_or_none", skip_serializing_if = "Option::is_none")]
    pub interface: Option<ProxyInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyInterface {
    #[serde(default)]
    pub dns: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: String,
    #[serde(with = "string_int", default)]
    pub useip: i64,
}
