//! Id lookups by technical name
//!
//! Manifests reference hosts, templates, host groups and proxies by id. These
//! lookups resolve a name to that id and fail unless exactly one object
//! matches.

use crate::engine::orchestrator;
use crate::error::{Error, Result};
use crate::session::Session;
use serde_json::{Map, Value};
use std::fmt;
use zabbix_api::ObjectKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LookupKind {
    Host,
    Template,
    HostGroup,
    Proxy,
}

impl LookupKind {
    pub fn object_kind(self) -> ObjectKind {
        match self {
            Self::Host => ObjectKind::Host,
            Self::Template => ObjectKind::Template,
            Self::HostGroup => ObjectKind::HostGroup,
            Self::Proxy => ObjectKind::Proxy,
        }
    }

    /// Field the name is matched against
    pub fn name_field(self) -> &'static str {
        match self {
            Self::Host | Self::Template | Self::Proxy => "host",
            Self::HostGroup => "name",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Host => "host",
            Self::Template => "template",
            Self::HostGroup => "host group",
            Self::Proxy => "proxy",
        };
        write!(f, "{s}")
    }
}

/// One resolved object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub id: String,
    /// Visible name, when the object has one
    pub display_name: String,
}

pub fn lookup(session: &Session<'_>, kind: LookupKind, name: &str) -> Result<Found> {
    let object_kind = kind.object_kind();
    let matches: Vec<Map<String, Value>> = orchestrator::retry(session.ctx, session.retry(), || {
        Ok(session.api()?.find_by(object_kind, kind.name_field(), name)?)
    })?;

    let not_found = |reason: String| Error::ReferenceNotFound {
        reference: format!("{kind} \"{name}\""),
        reason,
    };
    let [object] = matches.as_slice() else {
        return Err(not_found(format!("expected exactly one match, got {}", matches.len())));
    };

    let field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
    let id = field(object_kind.id_field()).ok_or_else(|| not_found(format!("reply has no {}", object_kind.id_field())))?;

    log::debug!("Resolved {kind} {name} to {id}");
    Ok(Found {
        id,
        display_name: field("name").unwrap_or_default(),
    })
}
