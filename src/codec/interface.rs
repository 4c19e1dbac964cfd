//! Host interfaces and their SNMP details

use super::{decode_into, flag, is_set, read_opt_token, read_token};
use crate::enums::{
    INTERFACE_TYPE, SNMP3_AUTH_PROTOCOL, SNMP3_PRIV_PROTOCOL, SNMP3_SECURITY_LEVEL, UnknownTokenPolicy,
};
use declarative::{AttributeReader, AttributeSet, AttributeValue, Diagnostics};
use zabbix_api::objects::host::{HostInterface, SnmpDetails};

const SNMP: i64 = 2;
const DEFAULT_PORT: &str = "10050";

/// Parse one interface block at the reader's current scope
///
/// `host_id` is only set by the standalone interface resource.
pub fn interface_from(reader: &mut AttributeReader<'_>, policy: UnknownTokenPolicy) -> HostInterface {
    let ip = reader.string_or("ip", "");
    let dns = reader.string_or("dns", "");
    if ip.is_empty() && dns.is_empty() {
        reader.violation("at least one of ip or dns must be set");
    }

    let kind = read_token(reader, "type", "agent", &INTERFACE_TYPE, policy);
    let details = reader.block("snmp_config", |r| snmp_from(r, policy));
    if kind == SNMP && details.is_none() {
        reader.violation_at("snmp_config", "required for an snmp interface");
    }

    HostInterface {
        id: reader.string_or("interface_id", ""),
        host_id: String::new(),
        useip: flag(!ip.is_empty()),
        main: flag(reader.bool_or("main", false)),
        port: reader.string_or("port", DEFAULT_PORT),
        kind,
        ip,
        dns,
        details,
    }
}

fn snmp_from(reader: &mut AttributeReader<'_>, policy: UnknownTokenPolicy) -> SnmpDetails {
    let version_text = reader.string("version");
    let version = match version_text.parse::<i64>() {
        Ok(v @ 1..=3) => v,
        _ if !reader.has("version") => 0,
        _ => {
            reader.violation_at("version", format!("unsupported SNMP version \"{version_text}\""));
            0
        }
    };

    let community = reader.string_or("community", "");
    if matches!(version, 1 | 2) && community.is_empty() {
        reader.violation_at("community", format!("required for SNMP version {version}"));
    }

    let mut details = SnmpDetails {
        version,
        bulk: flag(reader.bool_or("bulk", true)),
        community,
        ..Default::default()
    };

    reader.block("snmpv3_config", |r| {
        details.security_name = r.opt_string("security_name");
        details.security_level = read_opt_token(r, "security_level", &SNMP3_SECURITY_LEVEL, policy);
        details.auth_passphrase = r.opt_string("auth_passphrase");
        details.priv_passphrase = r.opt_string("priv_passphrase");
        details.auth_protocol = read_opt_token(r, "auth_protocol", &SNMP3_AUTH_PROTOCOL, policy);
        details.priv_protocol = read_opt_token(r, "priv_protocol", &SNMP3_PRIV_PROTOCOL, policy);
        details.context_name = r.opt_string("context_name");
    });

    details
}

/// Parse the repeated `name` attribute into interfaces
pub fn interfaces_from(
    reader: &mut AttributeReader<'_>,
    name: &str,
    policy: UnknownTokenPolicy,
) -> Vec<HostInterface> {
    reader.each(name, |r| Some(interface_from(r, policy)))
}

/// Declarative form of one interface
///
/// `path` prefixes diagnostics for codes that do not decode.
pub fn interface_to(interface: &HostInterface, path: &str, diags: &mut Diagnostics) -> AttributeSet {
    let mut attrs = AttributeSet::new()
        .with("interface_id", interface.id.as_str())
        .with("dns", interface.dns.as_str())
        .with("ip", interface.ip.as_str())
        .with("main", is_set(interface.main))
        .with("port", interface.port.as_str());
    decode_into(&mut attrs, diags, path, "type", &INTERFACE_TYPE, interface.kind);

    if let Some(details) = &interface.details {
        let snmp_path = format!("{path}.snmp_config");
        attrs.insert("snmp_config", snmp_to(details, &snmp_path, diags));
    }
    attrs
}

fn snmp_to(details: &SnmpDetails, path: &str, diags: &mut Diagnostics) -> AttributeSet {
    let mut attrs = AttributeSet::new()
        .with("version", details.version.to_string())
        .with("bulk", is_set(details.bulk))
        .with("community", details.community.as_str());

    if details.version == 3 {
        let v3_path = format!("{path}.snmpv3_config");
        let mut v3 = AttributeSet::new()
            .with("security_name", details.security_name.clone())
            .with("auth_passphrase", details.auth_passphrase.clone())
            .with("priv_passphrase", details.priv_passphrase.clone())
            .with("context_name", details.context_name.clone());
        let codes = [
            ("security_level", &SNMP3_SECURITY_LEVEL, details.security_level),
            ("auth_protocol", &SNMP3_AUTH_PROTOCOL, details.auth_protocol),
            ("priv_protocol", &SNMP3_PRIV_PROTOCOL, details.priv_protocol),
        ];
        for (name, mapping, code) in codes {
            if let Some(code) = code {
                decode_into(&mut v3, diags, &v3_path, name, mapping, code);
            }
        }
        attrs.insert("snmpv3_config", v3);
    }
    attrs
}

/// Declarative form of a list of interfaces
pub fn interfaces_to(interfaces: &[HostInterface], name: &str, diags: &mut Diagnostics) -> AttributeValue {
    AttributeValue::list(
        interfaces
            .iter()
            .enumerate()
            .map(|(i, iface)| interface_to(iface, &format!("{name}[{i}]"), diags)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::InvalidConfiguration;

    const STRICT: UnknownTokenPolicy = UnknownTokenPolicy::Strict;

    fn parse(attrs: &AttributeSet) -> Result<Vec<HostInterface>, InvalidConfiguration> {
        let mut reader = AttributeReader::new(attrs);
        let interfaces = interfaces_from(&mut reader, "interfaces", STRICT);
        reader.finish(interfaces)
    }

    fn with_interface(block: AttributeSet) -> AttributeSet {
        AttributeSet::new().with("interfaces", AttributeValue::list([block]))
    }

    #[test]
    fn test_agent_defaults() {
        let interfaces = parse(&with_interface(AttributeSet::new().with("ip", "10.0.0.5"))).unwrap();
        let iface = &interfaces[0];
        assert_eq!(iface.kind, 1);
        assert_eq!(iface.port, "10050");
        assert_eq!(iface.useip, 1);
        assert_eq!(iface.main, 0);
        assert!(iface.details.is_none());
    }

    #[test]
    fn test_dns_only_does_not_use_ip() {
        let interfaces = parse(&with_interface(AttributeSet::new().with("dns", "web01.local"))).unwrap();
        assert_eq!(interfaces[0].useip, 0);
    }

    #[test]
    fn test_collects_every_violation() {
        let err = parse(&AttributeSet::new().with(
            "interfaces",
            AttributeValue::list([
                AttributeSet::new().with("type", "snmp"),
                AttributeSet::new()
                    .with("ip", "10.0.0.6")
                    .with("type", "snmp")
                    .with("snmp_config", AttributeSet::new().with("version", "2")),
                AttributeSet::new().with("ip", "10.0.0.7").with("type", "serial"),
            ]),
        ))
        .unwrap_err();

        let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "interfaces[0]",
                "interfaces[0].snmp_config",
                "interfaces[1].snmp_config.community",
                "interfaces[2].type",
            ]
        );
    }

    #[test]
    fn test_snmp_v3_round_trip() {
        let declared = with_interface(
            AttributeSet::new()
                .with("ip", "10.0.0.5")
                .with("port", "161")
                .with("main", true)
                .with("type", "SNMP")
                .with(
                    "snmp_config",
                    AttributeSet::new()
                        .with("version", "3")
                        .with("bulk", false)
                        .with(
                            "snmpv3_config",
                            AttributeSet::new()
                                .with("security_name", "monitor")
                                .with("security_level", "auth_priv")
                                .with("auth_passphrase", "secret")
                                .with("auth_protocol", "sha256")
                                .with("priv_protocol", "aes128"),
                        ),
                ),
        );
        let interfaces = parse(&declared).unwrap();
        let details = interfaces[0].details.as_ref().unwrap();
        assert_eq!(details.security_level, Some(2));
        assert_eq!(details.auth_protocol, Some(3));
        assert_eq!(details.bulk, 0);

        let mut diags = Diagnostics::new();
        let back = interfaces_to(&interfaces, "interfaces", &mut diags);
        assert!(diags.is_empty());

        let elements = back.elements().unwrap();
        let block = elements[0].as_map().unwrap();
        assert_eq!(block.get_str("type"), Some("snmp"));
        let snmp = block.get("snmp_config").and_then(AttributeValue::as_map).unwrap();
        assert_eq!(snmp.get_str("version"), Some("3"));
        let v3 = snmp.get("snmpv3_config").and_then(AttributeValue::as_map).unwrap();
        assert_eq!(v3.get_str("auth_protocol"), Some("SHA256"));
        assert_eq!(v3.get_str("priv_protocol"), Some("AES128"));
        assert_eq!(v3.get_str("security_level"), Some("auth_priv"));
    }

    fn round_trip(declared: &AttributeSet) -> AttributeSet {
        let interfaces = parse(declared).unwrap();
        let mut diags = Diagnostics::new();
        let back = AttributeSet::new().with("interfaces", interfaces_to(&interfaces, "interfaces", &mut diags));
        assert!(diags.is_empty());
        back
    }

    fn snmp_interface(snmp_config: AttributeSet) -> AttributeSet {
        with_interface(
            AttributeSet::new()
                .with("interface_id", "21")
                .with("ip", "10.0.0.5")
                .with("dns", "")
                .with("port", "161")
                .with("main", true)
                .with("type", "snmp")
                .with("snmp_config", snmp_config),
        )
    }

    #[test]
    fn test_snmp_v1_and_v2_keep_whole_block() {
        for version in ["1", "2"] {
            let declared = snmp_interface(
                AttributeSet::new()
                    .with("version", version)
                    .with("bulk", true)
                    .with("community", "{$SNMP_COMMUNITY}"),
            );
            let back = round_trip(&declared);
            assert!(back.equivalent(&declared), "version {version}: {back:?}");
        }
    }

    #[test]
    fn test_snmp_v3_keeps_whole_block() {
        let declared = snmp_interface(
            AttributeSet::new()
                .with("version", "3")
                .with("bulk", false)
                .with("community", "")
                .with(
                    "snmpv3_config",
                    AttributeSet::new()
                        .with("security_name", "monitor")
                        .with("security_level", "auth_priv")
                        .with("auth_passphrase", "secret")
                        .with("priv_passphrase", "private")
                        .with("auth_protocol", "SHA512")
                        .with("priv_protocol", "AES256C")
                        .with("context_name", "backbone"),
                ),
        );
        let back = round_trip(&declared);
        assert!(back.equivalent(&declared), "{back:?}");
    }

    #[test]
    fn test_agent_interface_keeps_whole_block() {
        let declared = with_interface(
            AttributeSet::new()
                .with("interface_id", "")
                .with("ip", "")
                .with("dns", "web01.local")
                .with("port", "10050")
                .with("main", false)
                .with("type", "agent"),
        );
        let back = round_trip(&declared);
        assert!(back.equivalent(&declared), "{back:?}");
    }

    #[test]
    fn test_empty_snmp_version_is_rejected() {
        let err = parse(&with_interface(
            AttributeSet::new()
                .with("ip", "10.0.0.5")
                .with("type", "snmp")
                .with("snmp_config", AttributeSet::new().with("version", "").with("community", "public")),
        ))
        .unwrap_err();

        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].path, "interfaces[0].snmp_config.version");
        assert!(err.violations[0].message.contains("unsupported SNMP version"));
    }

    #[test]
    fn test_v2_omits_v3_block() {
        let iface = HostInterface {
            ip: "10.0.0.5".into(),
            kind: 2,
            details: Some(SnmpDetails {
                version: 2,
                bulk: 1,
                community: "public".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let attrs = interface_to(&iface, "interfaces[0]", &mut Diagnostics::new());
        let snmp = attrs.get("snmp_config").and_then(AttributeValue::as_map).unwrap();
        assert!(!snmp.has("snmpv3_config"));
        assert_eq!(snmp.get("bulk"), Some(&AttributeValue::Bool(true)));
    }

    #[test]
    fn test_empty_details_still_mean_snmp() {
        let iface = HostInterface {
            ip: "10.0.0.5".into(),
            kind: 2,
            details: Some(SnmpDetails::default()),
            ..Default::default()
        };
        let attrs = interface_to(&iface, "interfaces[0]", &mut Diagnostics::new());
        assert!(attrs.has("snmp_config"));
    }

    #[test]
    fn test_unknown_type_code_is_reported() {
        let iface = HostInterface {
            ip: "10.0.0.5".into(),
            kind: 7,
            ..Default::default()
        };
        let mut diags = Diagnostics::new();
        let attrs = interface_to(&iface, "interfaces[0]", &mut diags);
        assert!(!attrs.has("type"));
        assert_eq!(attrs.get_str("ip"), Some("10.0.0.5"));
        assert!(diags.has_errors());
    }
}
