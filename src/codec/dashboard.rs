//! Dashboard pages, widgets and widget fields
//!
//! The declarative form is a flat widget list. It is always written as a
//! single page; on read only the first page is exposed.

use crate::enums::WIDGET_FIELD_TYPE;
use declarative::{AttributeReader, AttributeSet, AttributeValue, Diagnostics};
use zabbix_api::objects::dashboard::{DashboardPage, Widget, WidgetField};

pub const PAGE_NAME: &str = "Page 1";

const GRAPH_FIELD: (i64, &str) = (6, "graphid");
const ITEM_FIELD: (i64, &str) = (4, "itemid");

fn field((kind, name): (i64, &str), value: String) -> WidgetField {
    WidgetField {
        kind,
        name: name.to_string(),
        value,
    }
}

fn widget_from(reader: &mut AttributeReader<'_>) -> Widget {
    let mut fields: Vec<WidgetField> = reader
        .strings("graph_ids")
        .into_iter()
        .map(|id| field(GRAPH_FIELD, id))
        .collect();
    fields.extend(reader.strings("item_ids").into_iter().map(|id| field(ITEM_FIELD, id)));

    Widget {
        kind: reader.string("type"),
        name: reader.string("name"),
        x: required_int(reader, "x"),
        y: required_int(reader, "y"),
        width: required_int(reader, "width"),
        height: required_int(reader, "height"),
        fields,
    }
}

fn required_int(reader: &mut AttributeReader<'_>, name: &str) -> i64 {
    if !reader.has(name) {
        reader.violation_at(name, "missing required attribute");
    }
    reader.int_or(name, 0)
}

/// Wrap the declared widgets into exactly one page
pub fn pages_from(reader: &mut AttributeReader<'_>, name: &str) -> Vec<DashboardPage> {
    let widgets = reader.each(name, |r| Some(widget_from(r)));
    vec![DashboardPage {
        name: PAGE_NAME.to_string(),
        widgets,
    }]
}

fn widget_to(widget: &Widget, path: &str, diags: &mut Diagnostics) -> AttributeSet {
    let mut graph_ids = Vec::new();
    let mut item_ids = Vec::new();
    for (i, f) in widget.fields.iter().enumerate() {
        let at = format!("{path}.fields[{i}].type");
        match diags.record(&at, WIDGET_FIELD_TYPE.decode(f.kind)) {
            Some("graph") => graph_ids.push(f.value.as_str()),
            Some("item") => item_ids.push(f.value.as_str()),
            Some(other) => log::debug!("Ignoring {other} field {} on widget {path}", f.name),
            None => {}
        }
    }

    AttributeSet::new()
        .with("type", widget.kind.as_str())
        .with("name", widget.name.as_str())
        .with("x", widget.x)
        .with("y", widget.y)
        .with("width", widget.width)
        .with("height", widget.height)
        .with("graph_ids", AttributeValue::list(graph_ids))
        .with("item_ids", AttributeValue::list(item_ids))
}

/// Widgets of the first page; further pages are reported and dropped
pub fn widgets_to(pages: &[DashboardPage], name: &str, diags: &mut Diagnostics) -> AttributeValue {
    let Some((first, rest)) = pages.split_first() else {
        return AttributeValue::list(Vec::<AttributeValue>::new());
    };
    if !rest.is_empty() {
        diags.warning(format!(
            "dashboard has {} pages; {} ignored pages",
            pages.len(),
            rest.len()
        ));
    }

    AttributeValue::list(
        first
            .widgets
            .iter()
            .enumerate()
            .map(|(i, w)| widget_to(w, &format!("{name}[{i}]"), diags)),
    )
}
