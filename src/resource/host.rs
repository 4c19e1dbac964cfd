//! Hosts

use super::{ObjectMapping, Write};
use crate::codec::{self, interface};
use crate::enums::UnknownTokenPolicy;
use crate::session::Session;
use declarative::{AttributeReader, AttributeValue, StateWriter};
use serde_json::{Value, json};
use zabbix_api::ObjectKind;
use zabbix_api::objects::host::Host;

/// Inventory disabled
const DEFAULT_INVENTORY_MODE: i64 = -1;
const DEFAULT_IPMI_AUTH_TYPE: i64 = -1;
/// IPMI user level
const DEFAULT_IPMI_PRIVILEGE: i64 = 2;

pub struct HostMapping;

impl ObjectMapping for HostMapping {
    type Object = Host;

    const NAME: &'static str = "host";
    const KIND: ObjectKind = ObjectKind::Host;
    const SENSITIVE: &'static [&'static str] = &["ipmi_password"];

    fn select() -> Value {
        json!({
            "selectInterfaces": "extend",
            "selectGroups": ["groupid"],
            "selectParentTemplates": ["templateid"],
            "selectMacros": ["macro", "value"],
            "selectTags": ["tag", "value"],
        })
    }

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, policy: UnknownTokenPolicy) -> Host {
        let groups = reader.strings("groups");
        if groups.is_empty() {
            reader.violation_at("groups", "at least one host group is required");
        }

        Host {
            id: write.id(),
            host: reader.string("host"),
            name: reader.string_or("name", ""),
            status: codec::flag(!reader.bool_or("monitored", true)),
            description: reader.string_or("description", ""),
            inventory_mode: reader.int_or("inventory_mode", DEFAULT_INVENTORY_MODE),
            ipmi_username: reader.string_or("ipmi_username", ""),
            ipmi_password: reader.string_or("ipmi_password", ""),
            ipmi_auth_type: reader.int_or("ipmi_auth_type", DEFAULT_IPMI_AUTH_TYPE),
            ipmi_privilege: reader.int_or("ipmi_privilege", DEFAULT_IPMI_PRIVILEGE),
            proxy_host_id: reader.string_or("proxy_host_id", "0"),
            interfaces: interface::interfaces_from(reader, "interfaces", policy),
            groups: codec::group_refs(groups),
            templates: codec::template_refs(reader.strings("templates")),
            parent_templates: Vec::new(),
            macros: codec::macros_from(reader, "macro"),
            tags: codec::tags_from_map(reader, "tags"),
        }
    }

    fn to_declarative(_session: &Session<'_>, host: &Host, state: &mut StateWriter) {
        state.set("host", host.host.as_str());
        state.set("name", host.name.as_str());
        state.set("monitored", host.status == 0);
        state.set("description", host.description.as_str());
        state.set("inventory_mode", host.inventory_mode);
        state.set("ipmi_username", host.ipmi_username.as_str());
        state.set("ipmi_auth_type", host.ipmi_auth_type);
        state.set("ipmi_privilege", host.ipmi_privilege);
        state.set("proxy_host_id", host.proxy_host_id.as_str());
        state.set("groups", codec::id_set(host.groups.iter().map(|g| g.id.as_str())));
        state.set(
            "templates",
            codec::id_set(host.parent_templates.iter().map(|t| t.id.as_str())),
        );
        state.set("macro", codec::macros_to(&host.macros));
        state.set("tags", codec::tags_to_map(&host.tags));

        let interfaces = interface::interfaces_to(&host.interfaces, "interfaces", state.diagnostics_mut());
        state.set("interfaces", as_set(interfaces));
    }
}

/// Interfaces are order-free on a host
fn as_set(value: AttributeValue) -> AttributeValue {
    match value {
        AttributeValue::List(items) => AttributeValue::Set(items.into_iter().collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resource::testing::with_resource;
    use declarative::AttributeSet;
    use std::sync::Arc;
    use zabbix_api::mock::ScriptedTransport;

    fn desired() -> AttributeSet {
        AttributeSet::new()
            .with("host", "web01")
            .with("groups", AttributeValue::set(["2"]))
            .with("ipmi_password", "hunter2")
            .with(
                "interfaces",
                AttributeValue::list([AttributeSet::new().with("ip", "10.0.0.5")]),
            )
            .with("tags", AttributeSet::new().with("env", "prod"))
    }

    fn remote_host() -> Value {
        json!({
            "hostid": "10084",
            "host": "web01",
            "name": "web01",
            "status": "0",
            "description": "",
            "inventory_mode": "-1",
            "ipmi_authtype": "-1",
            "ipmi_privilege": "2",
            "proxy_hostid": "0",
            "groups": [{"groupid": "2"}],
            "parentTemplates": [],
            "macros": [],
            "tags": [{"tag": "env", "value": "prod"}],
            "interfaces": [{
                "interfaceid": "31", "type": "1", "main": "1", "useip": "1",
                "ip": "10.0.0.5", "dns": "", "port": "10050", "details": []
            }]
        })
    }

    fn server() -> Arc<ScriptedTransport> {
        Arc::new(ScriptedTransport::with_handler(|method, _| match method {
            "host.create" => Ok(json!({"hostids": ["10084"]})),
            "host.get" => Ok(json!([remote_host()])),
            other => panic!("unexpected call {other}"),
        }))
    }

    #[test]
    fn test_create_reads_back_state() {
        let transport = server();
        let applied = with_resource("host", &transport, |r, ctx| r.create(ctx, &desired())).unwrap();

        assert_eq!(applied.id, "10084");
        assert!(applied.diagnostics.is_empty());
        assert_eq!(applied.state.get("monitored"), Some(&AttributeValue::Bool(true)));
        assert_eq!(applied.state.get_str("ipmi_password"), Some("hunter2"));

        let create = &transport.calls()[0];
        assert_eq!(create.params["status"], "0");
        assert_eq!(create.params["interfaces"][0]["useip"], "1");
        assert_eq!(create.params["groups"], json!([{"groupid": "2"}]));
        assert_eq!(transport.methods(), vec!["host.create", "host.get"]);
    }

    #[test]
    fn test_invalid_host_makes_no_call() {
        let transport = server();
        let desired = AttributeSet::new().with(
            "interfaces",
            AttributeValue::list([AttributeSet::new().with("type", "snmp")]),
        );
        let err = with_resource("host", &transport, |r, ctx| r.create(ctx, &desired)).unwrap_err();

        let Error::InvalidConfiguration(invalid) = err else {
            panic!("expected invalid configuration");
        };
        let paths: Vec<&str> = invalid.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["groups", "host", "interfaces[0]", "interfaces[0].snmp_config"]
        );
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_read_keeps_interfaces_as_set() {
        let transport = server();
        let applied = with_resource("host", &transport, |r, ctx| {
            r.read(ctx, "10084", &AttributeSet::new())
        })
        .unwrap();
        let interfaces = applied.state.get("interfaces").unwrap();
        assert!(matches!(interfaces, AttributeValue::Set(_)));
        assert!(!applied.state.has("ipmi_password"));
    }
}
