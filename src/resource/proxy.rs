//! Proxies

use super::{ObjectMapping, Write};
use crate::codec::{proxy, read_required_token};
use crate::enums::{PROXY_STATUS, UnknownTokenPolicy};
use crate::session::Session;
use declarative::{AttributeReader, StateWriter};
use serde_json::{Value, json};
use zabbix_api::ObjectKind;
use zabbix_api::objects::proxy::Proxy;

pub struct ProxyMapping;

impl ObjectMapping for ProxyMapping {
    type Object = Proxy;

    const NAME: &'static str = "proxy";
    const KIND: ObjectKind = ObjectKind::Proxy;

    fn select() -> Value {
        json!({
            "selectHosts": ["hostid"],
            "selectInterface": "extend",
        })
    }

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, policy: UnknownTokenPolicy) -> Proxy {
        let proxy_address = proxy::addresses_from(reader, "proxy_addresses");
        Proxy {
            id: write.id(),
            host: reader.string("name"),
            status: read_required_token(reader, "status", &PROXY_STATUS, policy),
            description: reader.string_or("description", ""),
            hosts: proxy::hosts_from(reader, "hosts"),
            interface: proxy::interface_from(reader, "interface", &proxy_address),
            proxy_address,
        }
    }

    fn to_declarative(_session: &Session<'_>, proxy: &Proxy, state: &mut StateWriter) {
        state.set("name", proxy.host.as_str());
        state.try_set("status", PROXY_STATUS.decode(proxy.status));
        state.set("description", proxy.description.as_str());
        state.set("hosts", proxy::hosts_to(&proxy.hosts));
        state.set("proxy_addresses", proxy::addresses_to(&proxy.proxy_address));
        if let Some(interface) = &proxy.interface {
            state.set("interface", proxy::interface_to(interface));
        }
    }
}
