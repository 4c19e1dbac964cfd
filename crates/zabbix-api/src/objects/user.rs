//! Users, user groups and roles.

use super::string_int;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    /// Write-only
    #[serde(rename = "passwd", default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(rename = "roleid", default)]
    pub role_id: String,
    #[serde(rename = "usrgrps", default)]
    pub groups: Vec<UserGroupRef>,
    #[serde(default)]
    pub medias: Vec<UserMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autologout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_per_page: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupRef {
    #[serde(rename = "usrgrpid")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMedia {
    #[serde(rename = "mediatypeid")]
    pub media_type_id: String,
    /// Email media carry several addresses, other kinds a single string
    #[serde(deserialize_with = "string_or_list")]
    pub sendto: Vec<String>,
    /// 0 enabled, 1 disabled
    #[serde(with = "string_int", default)]
    pub active: i64,
    /// Severity bit mask
    #[serde(with = "string_int", default)]
    pub severity: i64,
    #[serde(default)]
    pub period: String,
}

fn string_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::One(s) if s.is_empty() => Vec::new(),
        Raw::One(s) => vec![s],
        Raw::Many(v) => v,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    #[serde(rename = "usrgrpid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(with = "string_int", default)]
    pub gui_access: i64,
    #[serde(with = "string_int", default)]
    pub debug_mode: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "roleid", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    /// 1 user, 2 admin, 3 super admin
    #[serde(rename = "type", with = "string_int", default)]
    pub kind: i64,
    #[serde(with = "string_int", default, skip_serializing)]
    pub readonly: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sendto_accepts_string_or_list() {
        let sms: UserMedia = serde_json::from_value(json!({
            "mediatypeid": "3", "sendto": "+15550100", "active": "0", "severity": "63", "period": "1-7,00:00-24:00"
        }))
        .unwrap();
        assert_eq!(sms.sendto, vec!["+15550100"]);

        let email: UserMedia = serde_json::from_value(json!({
            "mediatypeid": "1", "sendto": ["a@example.com", "b@example.com"]
        }))
        .unwrap();
        assert_eq!(email.sendto.len(), 2);
    }

    #[test]
    fn test_password_not_sent_when_empty() {
        let user = User {
            username: "ops".into(),
            role_id: "1".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("passwd").is_none());
        assert!(value.get("lang").is_none());
    }
}
