//! Graph items

use declarative::{AttributeReader, AttributeSet, AttributeValue};
use zabbix_api::objects::graph::GraphItem;

/// `avg` aggregation
const DEFAULT_CALC_FNC: i64 = 2;

/// Ordered graph items; a graph needs at least one
pub fn graph_items_from(reader: &mut AttributeReader<'_>, name: &str) -> Vec<GraphItem> {
    let items = reader.each(name, |r| {
        Some(GraphItem {
            item_id: r.string("item_id"),
            color: r.string("color"),
            calc_fnc: r.int_or("calc_fnc", DEFAULT_CALC_FNC),
            kind: r.int_or("type", 0),
            yaxis_side: r.int_or("yaxis_side", 0),
            sortorder: r.int_or("sortorder", 0),
        })
    });
    if items.is_empty() {
        reader.violation_at(name, "at least one graph item is required");
    }
    items
}

pub fn graph_items_to(items: &[GraphItem]) -> AttributeValue {
    AttributeValue::list(items.iter().map(|item| {
        AttributeSet::new()
            .with("item_id", item.item_id.as_str())
            .with("color", item.color.as_str())
            .with("calc_fnc", item.calc_fnc)
            .with("type", item.kind)
            .with("yaxis_side", item.yaxis_side)
            .with("sortorder", item.sortorder)
    }))
}
