//! Standalone host interfaces

use super::{ObjectMapping, Write};
use crate::codec::interface;
use crate::enums::UnknownTokenPolicy;
use crate::session::Session;
use declarative::{AttributeReader, StateWriter};
use zabbix_api::ObjectKind;
use zabbix_api::objects::host::HostInterface;

pub struct HostInterfaceMapping;

impl ObjectMapping for HostInterfaceMapping {
    type Object = HostInterface;

    const NAME: &'static str = "host_interface";
    const KIND: ObjectKind = ObjectKind::HostInterface;
    const SENSITIVE: &'static [&'static str] = &["snmp_config"];

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, policy: UnknownTokenPolicy) -> HostInterface {
        let mut iface = interface::interface_from(reader, policy);
        iface.id = write.id();
        iface.host_id = reader.string("host_id");
        iface
    }

    fn to_declarative(_session: &Session<'_>, iface: &HostInterface, state: &mut StateWriter) {
        let attrs = interface::interface_to(iface, "", state.diagnostics_mut());
        for (name, value) in &attrs {
            state.set(name, value.clone());
        }
        state.set("host_id", iface.host_id.as_str());
    }
}
