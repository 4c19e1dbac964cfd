//! Items

use super::{ObjectMapping, Write};
use crate::codec::{self, item, read_token};
use crate::enums::{ITEM_TYPE, ITEM_VALUE_TYPE, UnknownTokenPolicy};
use crate::session::Session;
use declarative::{AttributeReader, StateWriter};
use serde_json::{Value, json};
use zabbix_api::ObjectKind;
use zabbix_api::objects::item::Item;

pub struct ItemMapping;

impl ObjectMapping for ItemMapping {
    type Object = Item;

    const NAME: &'static str = "item";
    const KIND: ObjectKind = ObjectKind::Item;

    fn select() -> Value {
        json!({
            "selectTags": ["tag", "value"],
            "selectPreprocessing": "extend",
        })
    }

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, policy: UnknownTokenPolicy) -> Item {
        Item {
            id: write.id(),
            host_id: reader.string("host_id"),
            interface_id: reader.string_or("interface_id", "0"),
            key: reader.string("key"),
            name: reader.string("name"),
            kind: read_token(reader, "type", "zabbix_agent", &ITEM_TYPE, policy),
            value_type: read_token(reader, "value_type", "float", &ITEM_VALUE_TYPE, policy),
            delay: reader.string_or("delay", ""),
            description: reader.string_or("description", ""),
            history: reader.string_or("history", ""),
            trends: reader.string_or("trends", ""),
            trapper_hosts: reader.string_or("trapper_host", ""),
            units: reader.string_or("units", ""),
            snmp_oid: reader.string_or("snmp_oid", ""),
            valuemap_id: reader.string_or("valuemap_id", "0"),
            tags: codec::tags_from_list(reader, "tags"),
            preprocessing: item::preprocessing_from(reader, "preprocessing", policy),
            hosts: Vec::new(),
        }
    }

    fn to_declarative(_session: &Session<'_>, item: &Item, state: &mut StateWriter) {
        state.set("host_id", item.host_id.as_str());
        state.set("interface_id", item.interface_id.as_str());
        state.set("key", item.key.as_str());
        state.set("name", item.name.as_str());
        state.set("delay", item.delay.as_str());
        state.set("description", item.description.as_str());
        state.set("history", item.history.as_str());
        state.set("trends", item.trends.as_str());
        state.set("trapper_host", item.trapper_hosts.as_str());
        state.set("units", item.units.as_str());
        state.set("snmp_oid", item.snmp_oid.as_str());
        state.set("valuemap_id", item.valuemap_id.as_str());
        state.set("tags", codec::tags_to_list(&item.tags));

        state.try_set("type", ITEM_TYPE.decode(item.kind));
        state.try_set("value_type", ITEM_VALUE_TYPE.decode(item.value_type));
        let preprocessing = item::preprocessing_to(&item.preprocessing, "preprocessing", state.diagnostics_mut());
        state.set("preprocessing", preprocessing);
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::resource::testing::with_resource;
    use declarative::{AttributeSet, AttributeValue};
    use serde_json::json;
    use std::sync::Arc;
    use zabbix_api::mock::ScriptedTransport;

    fn remote_item(kind: &str) -> serde_json::Value {
        json!({
            "itemid": "23296", "hostid": "10084", "interfaceid": "31",
            "key_": "system.cpu.load", "name": "CPU load", "type": kind, "value_type": "0",
            "delay": "1m", "history": "7d", "trends": "365d", "units": "",
            "tags": [{"tag": "component", "value": "cpu"}],
            "preprocessing": [{"type": "1", "params": "8", "error_handler": "0", "error_handler_params": ""}]
        })
    }

    #[test]
    fn test_create_encodes_tokens() {
        let transport = Arc::new(ScriptedTransport::with_handler(|method, _| match method {
            "item.create" => Ok(json!({"itemids": ["23296"]})),
            _ => Ok(json!([remote_item("7")])),
        }));
        let desired = AttributeSet::new()
            .with("host_id", "10084")
            .with("key", "system.cpu.load")
            .with("name", "CPU load")
            .with("type", "zabbix_agent_active")
            .with(
                "preprocessing",
                AttributeValue::list([AttributeSet::new().with("type", "multiplier").with("value", "8")]),
            );

        let applied = with_resource("item", &transport, |r, ctx| r.create(ctx, &desired)).unwrap();

        let create = &transport.calls()[0];
        assert_eq!(create.params["type"], "7");
        assert_eq!(create.params["value_type"], "0");
        assert_eq!(create.params["key_"], "system.cpu.load");
        assert_eq!(create.params["interfaceid"], "0");
        assert_eq!(applied.state.get_str("type"), Some("zabbix_agent_active"));
        assert_eq!(applied.state.get_str("value_type"), Some("float"));
    }

    #[test]
    fn test_unknown_code_is_field_diagnostic() {
        let transport = Arc::new(ScriptedTransport::with_replies(vec![Ok(json!([remote_item("99")]))]));
        let applied = with_resource("item", &transport, |r, ctx| {
            r.read(ctx, "23296", &AttributeSet::new())
        })
        .unwrap();

        assert!(applied.diagnostics.has_errors());
        assert!(!applied.state.has("type"));
        assert_eq!(applied.state.get_str("key"), Some("system.cpu.load"));
    }

    #[test]
    fn test_delete_resolves_owner_first() {
        let transport = Arc::new(ScriptedTransport::with_handler(|method, _| match method {
            "item.get" => Ok(json!([{"itemid": "23296", "hosts": [{"hostid": "10084", "host": "web01", "name": "web01"}]}])),
            "item.delete" => Ok(json!({"itemids": ["23296"]})),
            other => panic!("unexpected call {other}"),
        }));
        with_resource("item", &transport, |r, ctx| {
            r.delete(ctx, "23296", &AttributeSet::new())
        })
        .unwrap();
        assert_eq!(transport.methods(), vec!["item.get", "item.delete"]);
    }

    #[test]
    fn test_delete_without_owner_fails() {
        let transport = Arc::new(ScriptedTransport::with_replies(vec![Ok(json!([]))]));
        let err = with_resource("item", &transport, |r, ctx| {
            r.delete(ctx, "23296", &AttributeSet::new())
        })
        .unwrap_err();
        assert!(matches!(err, Error::AmbiguousParentage { .. }), "{err}");
        assert_eq!(transport.methods(), vec!["item.get"]);
    }
}
