//! Compound attribute codecs
//!
//! Each nested shape has a pair of functions: one parsing the declarative
//! form into the typed API object through an [`AttributeReader`] (so every
//! violation is collected), one rebuilding the declarative form from the API
//! object. The reverse direction never fails as a whole; codes that do not
//! decode are recorded as field diagnostics and the field is left out.
//!
//! Compound values are rebuilt from scratch on every call and never patched
//! in place.

pub mod dashboard;
pub mod graph;
pub mod interface;
pub mod item;
pub mod mediatype;
pub mod proxy;
pub mod user;
pub mod valuemap;

use crate::enums::{EnumMapping, UnknownTokenPolicy};
use declarative::{AttributeReader, AttributeSet, AttributeValue, Diagnostics};
use zabbix_api::objects::host::{GroupRef, Macro, Tag, TemplateRef};
use zabbix_api::objects::trigger::TriggerRef;

/// 0/1 flag from a boolean
pub fn flag(value: bool) -> i64 {
    i64::from(value)
}

/// Boolean from a 0/1 flag; anything non-zero is set
pub fn is_set(code: i64) -> bool {
    code != 0
}

/// Read an enumerated attribute and encode it, recording unknown tokens
pub fn read_token(
    reader: &mut AttributeReader<'_>,
    name: &str,
    default: &str,
    mapping: &EnumMapping,
    policy: UnknownTokenPolicy,
) -> i64 {
    let token = reader.string_or(name, default);
    encode_at(reader, name, &token, mapping, policy)
}

/// Required enumerated attribute
pub fn read_required_token(
    reader: &mut AttributeReader<'_>,
    name: &str,
    mapping: &EnumMapping,
    policy: UnknownTokenPolicy,
) -> i64 {
    if !reader.has(name) {
        reader.violation_at(name, "missing required attribute");
        return 0;
    }
    read_token(reader, name, "", mapping, policy)
}

/// Optional enumerated attribute; absent stays `None`
pub fn read_opt_token(
    reader: &mut AttributeReader<'_>,
    name: &str,
    mapping: &EnumMapping,
    policy: UnknownTokenPolicy,
) -> Option<i64> {
    let token = reader.opt_string(name)?;
    Some(encode_at(reader, name, &token, mapping, policy))
}

fn encode_at(
    reader: &mut AttributeReader<'_>,
    name: &str,
    token: &str,
    mapping: &EnumMapping,
    policy: UnknownTokenPolicy,
) -> i64 {
    match mapping.encode_with(token, policy) {
        Ok(code) => code,
        Err(e) => {
            reader.violation_at(name, e.to_string());
            0
        }
    }
}

/// Insert the token for `code` into `attrs`, or record why it could not be
/// decoded
pub fn decode_into(
    attrs: &mut AttributeSet,
    diags: &mut Diagnostics,
    path: &str,
    name: &str,
    mapping: &EnumMapping,
    code: i64,
) {
    let at = if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    };
    if let Some(token) = diags.record(&at, mapping.decode(code)) {
        attrs.insert(name, token);
    }
}

pub fn group_refs(ids: Vec<String>) -> Vec<GroupRef> {
    ids.into_iter().map(|id| GroupRef { id }).collect()
}

pub fn template_refs(ids: Vec<String>) -> Vec<TemplateRef> {
    ids.into_iter().map(|id| TemplateRef { id }).collect()
}

/// Order-free set of ids
pub fn id_set<'a>(ids: impl IntoIterator<Item = &'a str>) -> AttributeValue {
    AttributeValue::set(ids)
}

/// Tags declared as a `name -> value` map
pub fn tags_from_map(reader: &mut AttributeReader<'_>, name: &str) -> Vec<Tag> {
    reader
        .string_map(name)
        .into_iter()
        .map(|(tag, value)| Tag { tag, value })
        .collect()
}

pub fn tags_to_map(tags: &[Tag]) -> AttributeValue {
    tags.iter()
        .map(|t| (t.tag.clone(), AttributeValue::from(t.value.as_str())))
        .collect::<AttributeSet>()
        .into()
}

/// Tags declared as a list of `{tag, value}` blocks
///
/// Unlike the map form, this allows the same tag name more than once.
pub fn tags_from_list(reader: &mut AttributeReader<'_>, name: &str) -> Vec<Tag> {
    reader.each(name, |r| {
        Some(Tag {
            tag: r.string("tag"),
            value: r.string_or("value", ""),
        })
    })
}

pub fn tags_to_list(tags: &[Tag]) -> AttributeValue {
    AttributeValue::list(tags.iter().map(|t| {
        AttributeSet::new()
            .with("tag", t.tag.as_str())
            .with("value", t.value.as_str())
    }))
}

/// User macros as a set of `{name, value}` blocks
pub fn macros_from(reader: &mut AttributeReader<'_>, name: &str) -> Vec<Macro> {
    reader.each(name, |r| {
        Some(Macro {
            name: r.string("name"),
            value: r.string("value"),
        })
    })
}

pub fn macros_to(macros: &[Macro]) -> AttributeValue {
    AttributeValue::set(macros.iter().map(|m| {
        AttributeSet::new()
            .with("name", m.name.as_str())
            .with("value", m.value.as_str())
    }))
}

/// Trigger dependencies as a set of trigger ids
pub fn dependencies_from(reader: &mut AttributeReader<'_>, name: &str) -> Vec<TriggerRef> {
    reader
        .strings(name)
        .into_iter()
        .map(|id| TriggerRef { id })
        .collect()
}

pub fn dependencies_to(dependencies: &[TriggerRef]) -> AttributeValue {
    id_set(dependencies.iter().map(|d| d.id.as_str()))
}
