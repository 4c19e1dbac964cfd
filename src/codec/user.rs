//! User groups and user media

use declarative::{AttributeReader, AttributeSet, AttributeValue};
use zabbix_api::objects::user::{UserGroupRef, UserMedia};

/// Every severity
const ALL_SEVERITIES: i64 = 63;
const ALWAYS: &str = "1-7,00:00-24:00";

pub fn groups_from(reader: &mut AttributeReader<'_>, name: &str) -> Vec<UserGroupRef> {
    let groups: Vec<UserGroupRef> = reader
        .strings(name)
        .into_iter()
        .map(|id| UserGroupRef { id })
        .collect();
    if groups.is_empty() {
        reader.violation_at(name, "at least one user group is required");
    }
    groups
}

pub fn groups_to(groups: &[UserGroupRef]) -> AttributeValue {
    AttributeValue::list(groups.iter().map(|g| g.id.as_str()))
}

/// Media blocks; `active` is inverted on the wire (0 means enabled)
pub fn medias_from(reader: &mut AttributeReader<'_>, name: &str) -> Vec<UserMedia> {
    reader.each(name, |r| {
        let sendto = r.strings("sendto");
        if sendto.is_empty() {
            r.violation_at("sendto", "at least one recipient is required");
        }
        Some(UserMedia {
            media_type_id: r.string("media_type_id"),
            sendto,
            active: i64::from(!r.bool_or("active", true)),
            severity: r.int_or("severity", ALL_SEVERITIES),
            period: r.string_or("period", ALWAYS),
        })
    })
}

pub fn medias_to(medias: &[UserMedia]) -> AttributeValue {
    AttributeValue::list(medias.iter().map(|m| {
        AttributeSet::new()
            .with("media_type_id", m.media_type_id.as_str())
            .with("sendto", AttributeValue::list(m.sendto.iter().map(String::as_str)))
            .with("active", m.active == 0)
            .with("severity", m.severity)
            .with("period", m.period.as_str())
    }))
}
