use super::string_int;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(rename = "dashboardid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(with = "string_int", default)]
    pub display_period: i64,
    #[serde(with = "string_int", default)]
    pub auto_start: i64,
    #[serde(with = "string_int", default)]
    pub private: i64,
    #[serde(default)]
    pub pages: Vec<DashboardPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardPage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Widget type, e.g. `graph`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(with = "string_int", default)]
    pub x: i64,
    #[serde(with = "string_int", default)]
    pub y: i64,
    #[serde(with = "string_int", default)]
    pub width: i64,
    #[serde(with = "string_int", default)]
    pub height: i64,
    #[serde(default)]
    pub fields: Vec<WidgetField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetField {
    #[serde(rename = "type", with = "string_int")]
    pub kind: i64,
    pub name: String,
    pub value: String,
}
