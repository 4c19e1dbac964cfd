//! Item preprocessing steps

use super::{decode_into, read_required_token};
use crate::enums::{PREPROCESSING_TYPE, UnknownTokenPolicy};
use declarative::{AttributeReader, AttributeSet, AttributeValue, Diagnostics};
use zabbix_api::objects::item::Preprocessing;

/// Steps are sent with the default error handler
const DEFAULT_ERROR_HANDLER: &str = "0";

/// Ordered `{type, value}` steps
pub fn preprocessing_from(
    reader: &mut AttributeReader<'_>,
    name: &str,
    policy: UnknownTokenPolicy,
) -> Vec<Preprocessing> {
    reader.each(name, |r| {
        let kind = read_required_token(r, "type", &PREPROCESSING_TYPE, policy);
        Some(Preprocessing {
            kind,
            params: r.string_or("value", ""),
            error_handler: DEFAULT_ERROR_HANDLER.to_string(),
            error_handler_params: String::new(),
        })
    })
}

pub fn preprocessing_to(steps: &[Preprocessing], name: &str, diags: &mut Diagnostics) -> AttributeValue {
    AttributeValue::list(steps.iter().enumerate().map(|(i, step)| {
        let mut attrs = AttributeSet::new().with("value", step.params.as_str());
        decode_into(&mut attrs, diags, &format!("{name}[{i}]"), "type", &PREPROCESSING_TYPE, step.kind);
        attrs
    }))
}
