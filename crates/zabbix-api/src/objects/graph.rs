use super::string_int;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(rename = "graphid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(with = "string_int", default)]
    pub width: i64,
    #[serde(with = "string_int", default)]
    pub height: i64,
    #[serde(rename = "graphtype", with = "string_int", default)]
    pub graph_type: i64,
    #[serde(with = "string_int", default)]
    pub show_legend: i64,
    #[serde(with = "string_int", default)]
    pub show_work_period: i64,
    #[serde(with = "string_int", default)]
    pub show_triggers: i64,
    #[serde(rename = "yaxismin", default)]
    pub yaxis_min: String,
    #[serde(rename = "yaxismax", default)]
    pub yaxis_max: String,
    #[serde(default)]
    pub percent_left: String,
    #[serde(default)]
    pub percent_right: String,
    #[serde(with = "string_int", default)]
    pub ymin_type: i64,
    #[serde(with = "string_int", default)]
    pub ymax_type: i64,
    #[serde(rename = "gitems", default)]
    pub items: Vec<GraphItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphItem {
    #[serde(rename = "itemid")]
    pub item_id: String,
    pub color: String,
    #[serde(with = "string_int", default)]
    pub calc_fnc: i64,
    #[serde(rename = "type", with = "string_int", default)]
    pub kind: i64,
    #[serde(rename = "yaxisside", with = "string_int", default)]
    pub yaxis_side: i64,
    #[serde(with = "string_int", default)]
    pub sortorder: i64,
}
