//! Parentage resolution
//!
//! Items and triggers belong to exactly one host or template, but the API
//! only exposes that through `selectHosts` on a get call. Deleting a child
//! first resolves its owner so the delete can be logged against it.

use crate::error::{Error, Result};
use crate::session::Session;
use serde::Deserialize;
use serde_json::json;
use zabbix_api::objects::host::HostRef;
use zabbix_api::{ObjectKind, RemoteObjectRef};

/// Owner of a child object, computed on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentageRecord {
    pub child: RemoteObjectRef,
    pub parent_id: String,
    /// Technical name of the owning host or template
    pub parent_name: String,
}

#[derive(Deserialize)]
struct Owned {
    #[serde(default)]
    hosts: Vec<HostRef>,
}

/// Whether deleting `kind` requires its owner first
pub fn requires_parent(kind: ObjectKind) -> bool {
    matches!(kind, ObjectKind::Item | ObjectKind::Trigger)
}

/// Resolve the host or template that owns `child_id`
///
/// The query must return exactly one child with exactly one owner; anything
/// else, including no child at all, is [`Error::AmbiguousParentage`].
pub fn find_parent(session: &Session<'_>, kind: ObjectKind, child_id: &str) -> Result<ParentageRecord> {
    let children: Vec<Owned> = session.api()?.get(
        kind,
        json!({
            "output": [kind.id_field()],
            kind.ids_key(): [child_id],
            "selectHosts": ["hostid", "host", "name"],
        }),
    )?;

    let ambiguous = |parents| Error::AmbiguousParentage {
        kind: kind.api_name(),
        id: child_id.to_string(),
        children: children.len(),
        parents,
    };

    let [child] = children.as_slice() else {
        return Err(ambiguous(0));
    };
    let [parent] = child.hosts.as_slice() else {
        return Err(ambiguous(child.hosts.len()));
    };

    log::debug!("{kind} {child_id} belongs to host {} ({})", parent.host, parent.id);
    Ok(ParentageRecord {
        child: RemoteObjectRef::new(kind, child_id),
        parent_id: parent.id.clone(),
        parent_name: parent.host.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing;
    use declarative::OperationContext;
    use serde_json::Value;
    use std::sync::Arc;
    use zabbix_api::mock::ScriptedTransport;

    fn resolve(reply: Value, kind: ObjectKind) -> (Result<ParentageRecord>, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::with_replies(vec![Ok(reply)]));
        let provider = testing::provider(&transport);
        let ctx = OperationContext::new();
        let result = find_parent(&provider.session(&ctx), kind, "42");
        (result, transport)
    }

    #[test]
    fn test_single_owner() {
        let (record, transport) = resolve(
            json!([{"itemid": "42", "hosts": [{"hostid": "10084", "host": "web01", "name": "Web"}]}]),
            ObjectKind::Item,
        );
        let record = record.unwrap();
        assert_eq!(record.parent_id, "10084");
        assert_eq!(record.parent_name, "web01");
        assert_eq!(record.child, RemoteObjectRef::new(ObjectKind::Item, "42"));

        let call = &transport.calls()[0];
        assert_eq!(call.method, "item.get");
        assert_eq!(call.params["itemids"], json!(["42"]));
        assert!(call.params.get("selectHosts").is_some());
    }

    #[test]
    fn test_two_owners_is_ambiguous() {
        let (err, _) = resolve(
            json!([{"triggerid": "42", "hosts": [{"hostid": "1"}, {"hostid": "2"}]}]),
            ObjectKind::Trigger,
        );
        assert!(matches!(
            err.unwrap_err(),
            Error::AmbiguousParentage {
                kind: "trigger",
                children: 1,
                parents: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_child_is_ambiguous() {
        let (err, _) = resolve(json!([]), ObjectKind::Item);
        assert!(matches!(
            err.unwrap_err(),
            Error::AmbiguousParentage { children: 0, parents: 0, .. }
        ));
    }

    #[test]
    fn test_child_without_owner() {
        let (err, _) = resolve(json!([{"itemid": "42", "hosts": []}]), ObjectKind::Item);
        assert!(matches!(
            err.unwrap_err(),
            Error::AmbiguousParentage { children: 1, parents: 0, .. }
        ));
    }

    #[test]
    fn test_requires_parent() {
        assert!(requires_parent(ObjectKind::Item));
        assert!(requires_parent(ObjectKind::Trigger));
        assert!(!requires_parent(ObjectKind::Host));
    }
}
