//! Hosts, host interfaces and the small reference objects hosts embed.

use super::{object_or_none, opt_string_int, string_int};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Host {
    #[serde(rename = "hostid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// 0 monitored, 1 unmonitored
    #[serde(with = "string_int", default)]
    pub status: i64,
    #[serde(default)]
    pub description: String,
    #[serde(with = "string_int", default)]
    pub inventory_mode: i64,
    #[serde(default)]
    pub ipmi_username: String,
    #[serde(default)]
    pub ipmi_password: String,
    #[serde(rename = "ipmi_authtype", with = "string_int", default)]
    pub ipmi_auth_type: i64,
    #[serde(with = "string_int", default)]
    pub ipmi_privilege: i64,
    #[serde(rename = "proxy_hostid", default)]
    pub proxy_host_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<HostInterface>,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
    /// Linked templates on write
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<TemplateRef>,
    /// Linked templates on read (`selectParentTemplates`)
    #[serde(rename = "parentTemplates", default, skip_serializing)]
    pub parent_templates: Vec<TemplateRef>,
    #[serde(default)]
    pub macros: Vec<Macro>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Network interface of a host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostInterface {
    #[serde(rename = "interfaceid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Owning host; only sent by the standalone interface calls
    #[serde(rename = "hostid", default, skip_serializing_if = "String::is_empty")]
    pub host_id: String,
    #[serde(default)]
    pub dns: String,
    #[serde(default)]
    pub ip: String,
    #[serde(with = "string_int", default)]
    pub main: i64,
    #[serde(default)]
    pub port: String,
    #[serde(rename = "type", with = "string_int", default)]
    pub kind: i64,
    #[serde(with = "string_int", default)]
    pub useip: i64,
    /// SNMP details; an empty array on the wire means none
    #[serde(default, deserialize_with = "object_or_none", skip_serializing_if = "Option::is_none")]
    pub details: Option<SnmpDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnmpDetails {
    #[serde(with = "string_int", default)]
    pub version: i64,
    #[serde(with = "string_int", default)]
    pub bulk: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub community: String,
    #[serde(rename = "securityname", default, skip_serializing_if = "Option::is_none")]
    pub security_name: Option<String>,
    #[serde(
        rename = "securitylevel",
        with = "opt_string_int",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub security_level: Option<i64>,
    #[serde(rename = "authpassphrase", default, skip_serializing_if = "Option::is_none")]
    pub auth_passphrase: Option<String>,
    #[serde(rename = "privpassphrase", default, skip_serializing_if = "Option::is_none")]
    pub priv_passphrase: Option<String>,
    #[serde(
        rename = "authprotocol",
        with = "opt_string_int",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_protocol: Option<i64>,
    #[serde(
        rename = "privprotocol",
        with = "opt_string_int",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub priv_protocol: Option<i64>,
    #[serde(rename = "contextname", default, skip_serializing_if = "Option::is_none")]
    pub context_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(rename = "groupid")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    #[serde(rename = "templateid")]
    pub id: String,
}

/// User macro, e.g. `{$SNMP_COMMUNITY}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    #[serde(rename = "macro")]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag: String,
    #[serde(default)]
    pub value: String,
}

/// Host as embedded by `selectHosts` and returned by name lookups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRef {
    #[serde(rename = "hostid")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl HostRef {
    /// Reference carrying only the id, for write requests
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Template as returned by name lookups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "templateid")]
    pub id: String,
    pub host: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroup {
    #[serde(rename = "groupid")]
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_host_with_selects() {
        let host: Host = serde_json::from_value(json!({
            "hostid": "10084",
            "host": "web01",
            "name": "Web 01",
            "status": "0",
            "inventory_mode": "-1",
            "ipmi_authtype": "-1",
            "proxy_hostid": "0",
            "groups": [{"groupid": "2", "name": "Linux servers"}],
            "parentTemplates": [{"templateid": "10001", "name": "Linux"}],
            "interfaces": [{
                "interfaceid": "1",
                "hostid": "10084",
                "type": "2",
                "main": "1",
                "useip": "1",
                "ip": "10.0.0.5",
                "dns": "",
                "port": "161",
                "details": {"version": "2", "bulk": "1", "community": "public"}
            }],
            "tags": [{"tag": "env", "value": "prod"}],
            "macros": []
        }))
        .unwrap();

        assert_eq!(host.inventory_mode, -1);
        assert_eq!(host.parent_templates[0].id, "10001");
        let details = host.interfaces[0].details.as_ref().unwrap();
        assert_eq!(details.version, 2);
        assert_eq!(details.community, "public");
        assert!(details.security_level.is_none());
    }

    #[test]
    fn test_write_host_omits_read_only_fields() {
        let host = Host {
            host: "web01".into(),
            groups: vec![GroupRef { id: "2".into() }],
            parent_templates: vec![TemplateRef { id: "1".into() }],
            ..Default::default()
        };
        let value = serde_json::to_value(&host).unwrap();
        assert!(value.get("hostid").is_none());
        assert!(value.get("parentTemplates").is_none());
        assert!(value.get("interfaces").is_none());
        assert_eq!(value["status"], json!("0"));
    }

    #[test]
    fn test_interface_without_snmp() {
        let iface: HostInterface = serde_json::from_value(json!({
            "interfaceid": "3", "type": "1", "main": "1", "useip": "1",
            "ip": "127.0.0.1", "dns": "", "port": "10050", "details": []
        }))
        .unwrap();
        assert!(iface.details.is_none());
        assert!(serde_json::to_value(&iface).unwrap().get("details").is_none());
    }
}
