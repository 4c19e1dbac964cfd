use super::{opt_string_int, string_int};
use serde::{Deserialize, Serialize};

/// Media type; kind-specific fields are `None` for other kinds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(rename = "mediatypeid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    /// 0 email, 1 script, 2 SMS, 4 webhook
    #[serde(rename = "type", with = "string_int", default)]
    pub kind: i64,
    /// 0 enabled, 1 disabled
    #[serde(with = "string_int", default)]
    pub status: i64,
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_helo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_email: Option<String>,
    #[serde(with = "opt_string_int", default, skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<i64>,
    #[serde(with = "opt_string_int", default, skip_serializing_if = "Option::is_none")]
    pub smtp_authentication: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Write-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passwd: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_path: Option<String>,
    /// Newline-separated script parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_params: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<MediaParameter>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaParameter {
    pub name: String,
    #[serde(default)]
    pub value: String,
}
