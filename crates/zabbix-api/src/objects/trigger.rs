use super::host::HostRef;
use super::string_int;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "triggerid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Trigger name
    pub description: String,
    pub expression: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub event_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
    #[serde(with = "string_int", default)]
    pub recovery_mode: i64,
    #[serde(default)]
    pub recovery_expression: String,
    #[serde(with = "string_int", default)]
    pub manual_close: i64,
    #[serde(default)]
    pub comments: String,
    #[serde(with = "string_int", default)]
    pub priority: i64,
    #[serde(with = "string_int", default)]
    pub status: i64,
    /// `None` leaves existing dependencies untouched on update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<TriggerRef>>,
    /// Functions referenced as `{functionid}` in the expressions
    #[serde(default, skip_serializing)]
    pub functions: Vec<TriggerFunction>,
    #[serde(default, skip_serializing)]
    pub hosts: Vec<HostRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRef {
    #[serde(rename = "triggerid")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFunction {
    #[serde(rename = "functionid")]
    pub id: String,
    #[serde(rename = "itemid")]
    pub item_id: String,
    /// Function name, e.g. `avg`
    pub function: String,
    #[serde(default)]
    pub parameter: String,
}
