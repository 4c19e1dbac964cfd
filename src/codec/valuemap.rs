//! Value map mappings

use super::{decode_into, read_token};
use crate::enums::{UnknownTokenPolicy, VALUEMAP_MATCH_TYPE};
use declarative::{AttributeReader, AttributeSet, AttributeValue, Diagnostics};
use zabbix_api::objects::valuemap::ValueMapping;

pub fn mappings_from(
    reader: &mut AttributeReader<'_>,
    name: &str,
    policy: UnknownTokenPolicy,
) -> Vec<ValueMapping> {
    if !reader.has(name) {
        reader.violation_at(name, "missing required attribute");
    }
    reader.each(name, |r| {
        Some(ValueMapping {
            value: r.string("value"),
            new_value: r.string("new_value"),
            kind: read_token(r, "type", "exact_match", &VALUEMAP_MATCH_TYPE, policy),
        })
    })
}

pub fn mappings_to(mappings: &[ValueMapping], name: &str, diags: &mut Diagnostics) -> AttributeValue {
    AttributeValue::list(mappings.iter().enumerate().map(|(i, m)| {
        let mut attrs = AttributeSet::new()
            .with("value", m.value.as_str())
            .with("new_value", m.new_value.as_str());
        decode_into(&mut attrs, diags, &format!("{name}[{i}]"), "type", &VALUEMAP_MATCH_TYPE, m.kind);
        attrs
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_defaults_to_exact_match() {
        let attrs = AttributeSet::new().with(
            "mapping",
            AttributeValue::list([
                AttributeSet::new().with("value", "0").with("new_value", "Down"),
                AttributeSet::new()
                    .with("value", "^1.*")
                    .with("new_value", "Up")
                    .with("type", "regex_match"),
            ]),
        );
        let mut reader = AttributeReader::new(&attrs);
        let mappings = mappings_from(&mut reader, "mapping", UnknownTokenPolicy::Strict);
        assert!(reader.is_valid());
        assert_eq!(mappings[0].kind, 0);
        assert_eq!(mappings[1].kind, 4);

        let back = mappings_to(&mappings, "mapping", &mut Diagnostics::new());
        let first = back.elements().unwrap()[0].as_map().unwrap().clone();
        assert_eq!(first.get_str("type"), Some("exact_match"));
    }

    #[test]
    fn test_mappings_keep_whole_shape() {
        let declared = AttributeSet::new().with(
            "mapping",
            AttributeValue::list([
                AttributeSet::new()
                    .with("value", "0")
                    .with("new_value", "Down")
                    .with("type", "exact_match"),
                AttributeSet::new()
                    .with("value", "^1.*")
                    .with("new_value", "Up")
                    .with("type", "regex_match"),
                AttributeSet::new()
                    .with("value", "10-20")
                    .with("new_value", "Degraded")
                    .with("type", "in_range"),
            ]),
        );
        let mut reader = AttributeReader::new(&declared);
        let mappings = mappings_from(&mut reader, "mapping", UnknownTokenPolicy::Strict);
        let mappings = reader.finish(mappings).unwrap();

        let mut diags = Diagnostics::new();
        let back = AttributeSet::new().with("mapping", mappings_to(&mappings, "mapping", &mut diags));
        assert!(diags.is_empty());
        assert!(back.equivalent(&declared), "{back:?}");
    }

    #[test]
    fn test_legacy_policy_accepts_unknown_type() {
        let attrs = AttributeSet::new().with(
            "mapping",
            AttributeValue::list([AttributeSet::new()
                .with("value", "1")
                .with("new_value", "Up")
                .with("type", "fuzzy")]),
        );
        let mut strict = AttributeReader::new(&attrs);
        mappings_from(&mut strict, "mapping", UnknownTokenPolicy::Strict);
        assert_eq!(strict.violations()[0].path, "mapping[0].type");

        let mut legacy = AttributeReader::new(&attrs);
        let mappings = mappings_from(&mut legacy, "mapping", UnknownTokenPolicy::LegacyZeroDefault);
        assert!(legacy.is_valid());
        assert_eq!(mappings[0].kind, 0);
    }

    #[test]
    fn test_mapping_required() {
        let attrs = AttributeSet::new();
        let mut reader = AttributeReader::new(&attrs);
        mappings_from(&mut reader, "mapping", UnknownTokenPolicy::Strict);
        assert_eq!(reader.violations()[0].path, "mapping");
    }
}
