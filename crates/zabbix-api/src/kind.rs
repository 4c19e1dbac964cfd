//! Remote object kinds and references

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of object managed through the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Host,
    Item,
    Trigger,
    Graph,
    Dashboard,
    User,
    UserGroup,
    Proxy,
    Role,
    MediaType,
    ValueMap,
    HostInterface,
    Template,
    HostGroup,
    AuthenticationSettings,
    HousekeepingSettings,
}

impl ObjectKind {
    /// API object name used as the method prefix, e.g. `host` in `host.get`
    #[must_use]
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Item => "item",
            Self::Trigger => "trigger",
            Self::Graph => "graph",
            Self::Dashboard => "dashboard",
            Self::User => "user",
            Self::UserGroup => "usergroup",
            Self::Proxy => "proxy",
            Self::Role => "role",
            Self::MediaType => "mediatype",
            Self::ValueMap => "valuemap",
            Self::HostInterface => "hostinterface",
            Self::Template => "template",
            Self::HostGroup => "hostgroup",
            Self::AuthenticationSettings => "authentication",
            Self::HousekeepingSettings => "housekeeping",
        }
    }

    /// Name of the id property, e.g. `hostid`; empty for singletons
    #[must_use]
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Host => "hostid",
            Self::Item => "itemid",
            Self::Trigger => "triggerid",
            Self::Graph => "graphid",
            Self::Dashboard => "dashboardid",
            Self::User => "userid",
            Self::UserGroup => "usrgrpid",
            Self::Proxy => "proxyid",
            Self::Role => "roleid",
            Self::MediaType => "mediatypeid",
            Self::ValueMap => "valuemapid",
            Self::HostInterface => "interfaceid",
            Self::Template => "templateid",
            Self::HostGroup => "groupid",
            Self::AuthenticationSettings | Self::HousekeepingSettings => "",
        }
    }

    /// Key of the id list in get parameters and mutation results
    #[must_use]
    pub fn ids_key(self) -> String {
        format!("{}s", self.id_field())
    }

    /// Settings objects have exactly one instance and no id
    #[must_use]
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::AuthenticationSettings | Self::HousekeepingSettings)
    }

    /// Full method name, e.g. `item.get`
    #[must_use]
    pub fn method(self, action: &str) -> String {
        format!("{}.{action}", self.api_name())
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Typed reference to one remote object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteObjectRef {
    pub kind: ObjectKind,
    pub id: String,
}

impl RemoteObjectRef {
    pub fn new(kind: ObjectKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }
}

impl fmt::Display for RemoteObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_key() {
        assert_eq!(ObjectKind::Host.ids_key(), "hostids");
        assert_eq!(ObjectKind::UserGroup.ids_key(), "usrgrpids");
        assert_eq!(ObjectKind::HostInterface.ids_key(), "interfaceids");
    }

    #[test]
    fn test_method() {
        assert_eq!(ObjectKind::MediaType.method("create"), "mediatype.create");
        assert_eq!(ObjectKind::HousekeepingSettings.method("update"), "housekeeping.update");
    }

    #[test]
    fn test_singletons() {
        assert!(ObjectKind::AuthenticationSettings.is_singleton());
        assert!(!ObjectKind::Host.is_singleton());
    }

    #[test]
    fn test_ref_display() {
        let r = RemoteObjectRef::new(ObjectKind::Trigger, "17");
        assert_eq!(r.to_string(), "trigger 17");
    }
}
