//! Token/code translation tables
//!
//! Declarative attributes name enumerated values with tokens (`snmp`,
//! `auth_priv`, `disaster`); the API expects integer codes. Each
//! classification is a static, bijective table. Encoding ignores ASCII case;
//! decoding always yields the table's canonical token.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// What to do with a token that is not in its table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTokenPolicy {
    /// Reject the token
    #[default]
    Strict,
    /// Silently use code 0, as older releases did
    #[serde(rename = "legacy")]
    LegacyZeroDefault,
}

/// Immutable token/code table for one classification
#[derive(Debug)]
pub struct EnumMapping {
    pub classification: &'static str,
    entries: &'static [(&'static str, i64)],
}

impl EnumMapping {
    const fn new(classification: &'static str, entries: &'static [(&'static str, i64)]) -> Self {
        Self {
            classification,
            entries,
        }
    }

    /// Code for `token`, ignoring ASCII case
    pub fn encode(&self, token: &str) -> Result<i64> {
        self.entries
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(token))
            .map(|(_, code)| *code)
            .ok_or_else(|| Error::UnknownToken {
                classification: self.classification,
                token: token.to_string(),
            })
    }

    /// Code for `token` under `policy`
    pub fn encode_with(&self, token: &str, policy: UnknownTokenPolicy) -> Result<i64> {
        match (self.encode(token), policy) {
            (Err(Error::UnknownToken { .. }), UnknownTokenPolicy::LegacyZeroDefault) => {
                log::warn!(
                    "Unknown {} \"{token}\", defaulting to code 0",
                    self.classification
                );
                Ok(0)
            }
            (result, _) => result,
        }
    }

    /// Token for `code`
    pub fn decode(&self, code: i64) -> Result<&'static str> {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(token, _)| *token)
            .ok_or(Error::UnknownCode {
                classification: self.classification,
                code,
            })
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(t, _)| *t)
    }

    pub fn entries(&self) -> &'static [(&'static str, i64)] {
        self.entries
    }
}

pub static INTERFACE_TYPE: EnumMapping = EnumMapping::new(
    "interface type",
    &[("agent", 1), ("snmp", 2), ("ipmi", 3), ("jmx", 4)],
);

pub static SNMP3_SECURITY_LEVEL: EnumMapping = EnumMapping::new(
    "SNMPv3 security level",
    &[("noauth_nopriv", 0), ("auth_nopriv", 1), ("auth_priv", 2)],
);

pub static SNMP3_AUTH_PROTOCOL: EnumMapping = EnumMapping::new(
    "SNMPv3 authentication protocol",
    &[
        ("MD5", 0),
        ("SHA1", 1),
        ("SHA224", 2),
        ("SHA256", 3),
        ("SHA384", 4),
        ("SHA512", 5),
    ],
);

pub static SNMP3_PRIV_PROTOCOL: EnumMapping = EnumMapping::new(
    "SNMPv3 privacy protocol",
    &[
        ("DES", 0),
        ("AES128", 1),
        ("AES192", 2),
        ("AES256", 3),
        ("AES192C", 4),
        ("AES256C", 5),
    ],
);

pub static PROXY_STATUS: EnumMapping =
    EnumMapping::new("proxy status", &[("active", 5), ("passive", 6)]);

pub static ROLE_TYPE: EnumMapping = EnumMapping::new(
    "role type",
    &[("user", 1), ("admin", 2), ("super_admin", 3)],
);

pub static VALUEMAP_MATCH_TYPE: EnumMapping = EnumMapping::new(
    "value map match type",
    &[
        ("exact_match", 0),
        ("greater_or_equal", 1),
        ("less_or_equal", 2),
        ("in_range", 3),
        ("regex_match", 4),
        ("default_match", 5),
    ],
);

pub static ITEM_TYPE: EnumMapping = EnumMapping::new(
    "item type",
    &[
        ("zabbix_agent", 0),
        ("zabbix_trapper", 2),
        ("simple_check", 3),
        ("zabbix_internal", 5),
        ("zabbix_agent_active", 7),
        ("web_item", 9),
        ("external_check", 10),
        ("database_monitor", 11),
        ("ipmi_agent", 12),
        ("ssh_agent", 13),
        ("telnet_agent", 14),
        ("calculated", 15),
        ("jmx_agent", 16),
        ("snmp_trap", 17),
        ("dependent_item", 18),
        ("http_agent", 19),
        ("snmp_agent", 20),
        ("script", 21),
    ],
);

pub static ITEM_VALUE_TYPE: EnumMapping = EnumMapping::new(
    "item value type",
    &[
        ("float", 0),
        ("char", 1),
        ("log", 2),
        ("unsigned", 3),
        ("text", 4),
    ],
);

pub static PREPROCESSING_TYPE: EnumMapping = EnumMapping::new(
    "preprocessing step type",
    &[
        ("multiplier", 1),
        ("rtrim", 2),
        ("ltrim", 3),
        ("trim", 4),
        ("regex", 5),
        ("bool_to_decimal", 6),
        ("octal_to_decimal", 7),
        ("hex_to_decimal", 8),
        ("simple_change", 9),
        ("change_per_second", 10),
        ("xml_xpath", 11),
        ("jsonpath", 12),
        ("in_range", 13),
        ("matches_regex", 14),
        ("not_matches_regex", 15),
        ("check_json_error", 16),
        ("check_xml_error", 17),
        ("check_regex_error", 18),
        ("discard_unchanged", 19),
        ("discard_unchanged_heartbeat", 20),
        ("javascript", 21),
        ("prometheus_pattern", 22),
        ("prometheus_to_json", 23),
        ("csv_to_json", 24),
        ("replace", 25),
        ("check_unsupported", 26),
        ("xml_to_json", 27),
    ],
);

pub static TRIGGER_SEVERITY: EnumMapping = EnumMapping::new(
    "trigger severity",
    &[
        ("not_classified", 0),
        ("info", 1),
        ("warning", 2),
        ("average", 3),
        ("high", 4),
        ("disaster", 5),
    ],
);

pub static TRIGGER_RECOVERY_MODE: EnumMapping = EnumMapping::new(
    "trigger recovery mode",
    &[("default", 0), ("recovery_expression", 1), ("none", 2)],
);

pub static TRIGGER_MANUAL_CLOSE: EnumMapping =
    EnumMapping::new("trigger manual close", &[("no", 0), ("yes", 1)]);

pub static MEDIA_TYPE_KIND: EnumMapping = EnumMapping::new(
    "media type",
    &[("email", 0), ("script", 1), ("sms", 2), ("webhook", 4)],
);

pub static WIDGET_FIELD_TYPE: EnumMapping = EnumMapping::new(
    "widget field type",
    &[
        ("integer", 0),
        ("string", 1),
        ("host_group", 2),
        ("host", 3),
        ("item", 4),
        ("item_prototype", 5),
        ("graph", 6),
        ("graph_prototype", 7),
        ("map", 8),
    ],
);

/// Every table, for validation and listings
pub static ALL: &[&EnumMapping] = &[
    &INTERFACE_TYPE,
    &SNMP3_SECURITY_LEVEL,
    &SNMP3_AUTH_PROTOCOL,
    &SNMP3_PRIV_PROTOCOL,
    &PROXY_STATUS,
    &ROLE_TYPE,
    &VALUEMAP_MATCH_TYPE,
    &ITEM_TYPE,
    &ITEM_VALUE_TYPE,
    &PREPROCESSING_TYPE,
    &TRIGGER_SEVERITY,
    &TRIGGER_RECOVERY_MODE,
    &TRIGGER_MANUAL_CLOSE,
    &MEDIA_TYPE_KIND,
    &WIDGET_FIELD_TYPE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_table_is_bijective() {
        for mapping in ALL {
            let tokens: HashSet<String> = mapping.tokens().map(str::to_ascii_lowercase).collect();
            let codes: HashSet<i64> = mapping.entries().iter().map(|(_, c)| *c).collect();
            assert_eq!(tokens.len(), mapping.entries().len(), "{}", mapping.classification);
            assert_eq!(codes.len(), mapping.entries().len(), "{}", mapping.classification);
        }
    }

    #[test]
    fn test_every_token_round_trips() {
        for mapping in ALL {
            for &(token, code) in mapping.entries() {
                assert_eq!(mapping.encode(token).unwrap(), code);
                assert_eq!(mapping.decode(code).unwrap(), token);
            }
        }
    }

    #[test]
    fn test_encode_ignores_case() {
        assert_eq!(SNMP3_AUTH_PROTOCOL.encode("sha256").unwrap(), 3);
        assert_eq!(TRIGGER_SEVERITY.encode("DISASTER").unwrap(), 5);
        assert_eq!(SNMP3_AUTH_PROTOCOL.decode(3).unwrap(), "SHA256");
    }

    #[test]
    fn test_unknown_token_is_reported() {
        let err = INTERFACE_TYPE.encode("serial").unwrap_err();
        assert_eq!(err.to_string(), "unknown interface type \"serial\"");
        assert!(
            INTERFACE_TYPE
                .encode_with("serial", UnknownTokenPolicy::Strict)
                .is_err()
        );
    }

    #[test]
    fn test_legacy_policy_defaults_to_zero() {
        assert_eq!(
            ITEM_VALUE_TYPE
                .encode_with("double", UnknownTokenPolicy::LegacyZeroDefault)
                .unwrap(),
            0
        );
        // Known tokens are unaffected
        assert_eq!(
            ITEM_VALUE_TYPE
                .encode_with("text", UnknownTokenPolicy::LegacyZeroDefault)
                .unwrap(),
            4
        );
    }

    #[test]
    fn test_unknown_code() {
        assert!(matches!(
            PROXY_STATUS.decode(7),
            Err(Error::UnknownCode { code: 7, .. })
        ));
    }

    #[test]
    fn test_policy_config_names() {
        #[derive(Deserialize)]
        struct Holder {
            policy: UnknownTokenPolicy,
        }
        let h: Holder = toml::from_str("policy = \"legacy\"").unwrap();
        assert_eq!(h.policy, UnknownTokenPolicy::LegacyZeroDefault);
        let h: Holder = toml::from_str("policy = \"strict\"").unwrap();
        assert_eq!(h.policy, UnknownTokenPolicy::Strict);
    }
}
