//! Proxy interface, monitored hosts and address list

use super::{flag, is_set};
use declarative::{AttributeReader, AttributeSet, AttributeValue};
use zabbix_api::objects::host::HostRef;
use zabbix_api::objects::proxy::ProxyInterface;

/// Optional single interface block of a passive proxy
///
/// Conflicts with `proxy_addresses`, which only active proxies use.
pub fn interface_from(reader: &mut AttributeReader<'_>, name: &str, addresses: &str) -> Option<ProxyInterface> {
    let interface = reader.block(name, |r| {
        let ip = r.string_or("ip", "");
        let dns = r.string_or("dns", "");
        if !ip.is_empty() && !dns.is_empty() {
            r.violation("only one of ip or dns may be set");
        }
        if !r.has("use_ip") {
            r.violation_at("use_ip", "missing required attribute");
        }
        ProxyInterface {
            port: r.string("port"),
            useip: flag(r.bool_or("use_ip", false)),
            ip,
            dns,
        }
    })?;

    if !addresses.is_empty() {
        reader.violation_at(name, "conflicts with proxy_addresses");
    }
    Some(interface)
}

pub fn interface_to(interface: &ProxyInterface) -> AttributeValue {
    AttributeValue::list([AttributeSet::new()
        .with("dns", interface.dns.as_str())
        .with("ip", interface.ip.as_str())
        .with("port", interface.port.as_str())
        .with("use_ip", is_set(interface.useip))])
}

/// Comma-joined address list
pub fn addresses_from(reader: &mut AttributeReader<'_>, name: &str) -> String {
    reader.strings(name).join(",")
}

pub fn addresses_to(joined: &str) -> AttributeValue {
    AttributeValue::list(joined.split(',').map(str::trim).filter(|a| !a.is_empty()))
}

pub fn hosts_from(reader: &mut AttributeReader<'_>, name: &str) -> Vec<HostRef> {
    reader.strings(name).into_iter().map(HostRef::id).collect()
}

pub fn hosts_to(hosts: &[HostRef]) -> AttributeValue {
    AttributeValue::list(hosts.iter().map(|h| h.id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_round_trip() {
        let attrs = AttributeSet::new().with("proxy_addresses", AttributeValue::list(["10.0.0.1", "10.0.0.2"]));
        let mut reader = AttributeReader::new(&attrs);
        let joined = addresses_from(&mut reader, "proxy_addresses");
        assert_eq!(joined, "10.0.0.1,10.0.0.2");
        assert_eq!(addresses_to(&joined), *attrs.get("proxy_addresses").unwrap());
        assert_eq!(addresses_to(""), AttributeValue::List(Vec::new()));
    }

    #[test]
    fn test_interface_with_ip_and_dns() {
        let attrs = AttributeSet::new().with(
            "interface",
            AttributeSet::new()
                .with("ip", "10.0.0.1")
                .with("dns", "proxy.local")
                .with("port", "10051")
                .with("use_ip", true),
        );
        let mut reader = AttributeReader::new(&attrs);
        interface_from(&mut reader, "interface", "");
        assert_eq!(reader.violations().len(), 1);
        assert_eq!(reader.violations()[0].path, "interface");
    }

    #[test]
    fn test_interface_conflicts_with_addresses() {
        let attrs = AttributeSet::new().with(
            "interface",
            AttributeValue::list([AttributeSet::new()
                .with("ip", "10.0.0.1")
                .with("port", "10051")
                .with("use_ip", true)]),
        );
        let mut reader = AttributeReader::new(&attrs);
        let interface = interface_from(&mut reader, "interface", "10.0.0.9").unwrap();
        assert_eq!(interface.useip, 1);
        assert_eq!(reader.violations()[0].message, "conflicts with proxy_addresses");
    }

    #[test]
    fn test_interface_round_trip() {
        let interface = ProxyInterface {
            dns: "proxy.local".into(),
            ip: String::new(),
            port: "10051".into(),
            useip: 0,
        };
        let attrs = AttributeSet::new().with("interface", interface_to(&interface));
        let mut reader = AttributeReader::new(&attrs);
        assert_eq!(interface_from(&mut reader, "interface", ""), Some(interface));
        assert!(reader.is_valid());
    }
}
