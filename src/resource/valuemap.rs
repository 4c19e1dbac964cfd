//! Value maps

use super::{ObjectMapping, Write};
use crate::codec::valuemap;
use crate::enums::UnknownTokenPolicy;
use crate::session::Session;
use declarative::{AttributeReader, StateWriter};
use serde_json::{Value, json};
use zabbix_api::ObjectKind;
use zabbix_api::objects::valuemap::ValueMap;

pub struct ValueMapMapping;

impl ObjectMapping for ValueMapMapping {
    type Object = ValueMap;

    const NAME: &'static str = "valuemap";
    const KIND: ObjectKind = ObjectKind::ValueMap;

    fn select() -> Value {
        json!({ "selectMappings": "extend" })
    }

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, policy: UnknownTokenPolicy) -> ValueMap {
        let host_id = reader.string("host_id");
        let uuid = reader.opt_string("uuid");
        // The owner and uuid are fixed at creation; the API rejects them on update
        let (host_id, uuid) = if write.is_update() {
            (None, None)
        } else {
            (Some(host_id), uuid)
        };

        ValueMap {
            id: write.id(),
            name: reader.string("name"),
            host_id,
            uuid,
            mappings: valuemap::mappings_from(reader, "mapping", policy),
        }
    }

    fn to_declarative(_session: &Session<'_>, map: &ValueMap, state: &mut StateWriter) {
        state.set("name", map.name.as_str());
        state.set("host_id", map.host_id.as_deref().unwrap_or_default());
        if let Some(uuid) = &map.uuid {
            state.set("uuid", uuid.as_str());
        }
        let mappings = valuemap::mappings_to(&map.mappings, "mapping", state.diagnostics_mut());
        state.set("mapping", mappings);
    }
}
