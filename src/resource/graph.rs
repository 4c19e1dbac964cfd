//! Graphs

use super::{ObjectMapping, Write};
use crate::codec::{self, graph};
use crate::enums::UnknownTokenPolicy;
use crate::session::Session;
use declarative::{AttributeReader, StateWriter};
use serde_json::{Value, json};
use zabbix_api::ObjectKind;
use zabbix_api::objects::graph::Graph;

const DEFAULT_WIDTH: i64 = 900;
const DEFAULT_HEIGHT: i64 = 200;

pub struct GraphMapping;

impl ObjectMapping for GraphMapping {
    type Object = Graph;

    const NAME: &'static str = "graph";
    const KIND: ObjectKind = ObjectKind::Graph;

    fn select() -> Value {
        json!({ "selectGraphItems": "extend" })
    }

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, _policy: UnknownTokenPolicy) -> Graph {
        Graph {
            id: write.id(),
            name: reader.string("name"),
            width: reader.int_or("width", DEFAULT_WIDTH),
            height: reader.int_or("height", DEFAULT_HEIGHT),
            graph_type: reader.int_or("graph_type", 0),
            show_legend: codec::flag(reader.bool_or("show_legend", true)),
            show_work_period: codec::flag(reader.bool_or("show_work_period", true)),
            show_triggers: codec::flag(reader.bool_or("show_triggers", true)),
            yaxis_min: reader.string_or("yaxis_min", "0"),
            yaxis_max: reader.string_or("yaxis_max", "100"),
            percent_left: reader.string_or("percent_left", "0"),
            percent_right: reader.string_or("percent_right", "0"),
            ymin_type: reader.int_or("ymin_type", 0),
            ymax_type: reader.int_or("ymax_type", 0),
            items: graph::graph_items_from(reader, "graph_items"),
        }
    }

    fn to_declarative(_session: &Session<'_>, graph: &Graph, state: &mut StateWriter) {
        state.set("name", graph.name.as_str());
        state.set("width", graph.width);
        state.set("height", graph.height);
        state.set("graph_type", graph.graph_type);
        state.set("show_legend", codec::is_set(graph.show_legend));
        state.set("show_work_period", codec::is_set(graph.show_work_period));
        state.set("show_triggers", codec::is_set(graph.show_triggers));
        state.set("yaxis_min", graph.yaxis_min.as_str());
        state.set("yaxis_max", graph.yaxis_max.as_str());
        state.set("percent_left", graph.percent_left.as_str());
        state.set("percent_right", graph.percent_right.as_str());
        state.set("ymin_type", graph.ymin_type);
        state.set("ymax_type", graph.ymax_type);
        state.set("graph_items", graph::graph_items_to(&graph.items));
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::resource::testing::with_resource;
    use declarative::{AttributeSet, AttributeValue};
    use serde_json::json;
    use std::sync::Arc;
    use zabbix_api::mock::ScriptedTransport;

    #[test]
    fn test_create_applies_defaults() {
        let transport = Arc::new(ScriptedTransport::with_handler(|method, _| match method {
            "graph.create" => Ok(json!({"graphids": ["541"]})),
            _ => Ok(json!([{
                "graphid": "541", "name": "CPU", "width": "900", "height": "200", "graphtype": "0",
                "show_legend": "1", "show_work_period": "1", "show_triggers": "1",
                "yaxismin": "0", "yaxismax": "100", "percent_left": "0", "percent_right": "0",
                "ymin_type": "0", "ymax_type": "0",
                "gitems": [{"itemid": "23296", "color": "1A7C11", "calc_fnc": "2", "type": "0", "yaxisside": "0", "sortorder": "0"}]
            }])),
        }));
        let desired = AttributeSet::new().with("name", "CPU").with(
            "graph_items",
            AttributeValue::list([AttributeSet::new().with("item_id", "23296").with("color", "1A7C11")]),
        );

        let applied = with_resource("graph", &transport, |r, ctx| r.create(ctx, &desired)).unwrap();

        let create = &transport.calls()[0];
        assert_eq!(create.params["width"], "900");
        assert_eq!(create.params["show_legend"], "1");
        assert_eq!(create.params["gitems"][0]["calc_fnc"], "2");
        assert_eq!(applied.state.get("show_triggers"), Some(&AttributeValue::Bool(true)));
        assert_eq!(applied.state.get("graph_items").and_then(AttributeValue::elements).map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_graph_needs_items() {
        let transport = Arc::new(ScriptedTransport::default());
        let desired = AttributeSet::new().with("name", "CPU").with("graph_items", AttributeValue::List(Vec::new()));
        let err = with_resource("graph", &transport, |r, ctx| r.create(ctx, &desired)).unwrap_err();
        let Error::InvalidConfiguration(invalid) = err else {
            panic!("expected invalid configuration");
        };
        assert_eq!(invalid.violations[0].path, "graph_items");
    }
}
