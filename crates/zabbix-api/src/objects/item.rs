use super::host::{HostRef, Tag};
use super::string_int;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "itemid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Owning host or template; cannot change after creation
    #[serde(rename = "hostid", default, skip_serializing_if = "String::is_empty")]
    pub host_id: String,
    #[serde(rename = "interfaceid", default)]
    pub interface_id: String,
    #[serde(rename = "key_")]
    pub key: String,
    pub name: String,
    #[serde(rename = "type", with = "string_int", default)]
    pub kind: i64,
    #[serde(with = "string_int", default)]
    pub value_type: i64,
    #[serde(default)]
    pub delay: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub history: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trends: String,
    #[serde(default)]
    pub trapper_hosts: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub snmp_oid: String,
    #[serde(rename = "valuemapid", default)]
    pub valuemap_id: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub preprocessing: Vec<Preprocessing>,
    /// Owning hosts (`selectHosts`)
    #[serde(default, skip_serializing)]
    pub hosts: Vec<HostRef>,
}

/// One preprocessing step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preprocessing {
    #[serde(rename = "type", with = "string_int")]
    pub kind: i64,
    #[serde(default)]
    pub params: String,
    #[serde(default)]
    pub error_handler: String,
    #[serde(default)]
    pub error_handler_params: String,
}
