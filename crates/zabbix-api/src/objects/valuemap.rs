use super::string_int;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueMap {
    #[serde(rename = "valuemapid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    /// Owning host; rejected by update calls
    #[serde(rename = "hostid", default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub mappings: Vec<ValueMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueMapping {
    #[serde(rename = "type", with = "string_int", default)]
    pub kind: i64,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "newvalue")]
    pub new_value: String,
}
