//! Per-kind resources
//!
//! Every regular kind is described by an [`ObjectMapping`]: the typed API
//! object, how to build it from a declarative attribute set and how to turn
//! it back into one. [`Managed`] wraps a mapping into a
//! [`declarative::Resource`], running each mutation through the
//! orchestrator. Settings singletons have their own resource in [`settings`].

pub mod dashboard;
pub mod graph;
pub mod host;
pub mod host_interface;
pub mod item;
pub mod mediatype;
pub mod proxy;
pub mod settings;
pub mod trigger;
pub mod user;
pub mod valuemap;

use crate::engine::orchestrator;
use crate::enums::UnknownTokenPolicy;
use crate::error::{Error, Result};
use crate::resolver;
use crate::session::{Provider, Session};
use declarative::{
    Applied, AttributeReader, AttributeSet, BoxedResource, Diagnostics, OperationContext, Resource, StateWriter,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use zabbix_api::{ObjectKind, RemoteObjectRef};

/// Which mutation a request is built for
#[derive(Debug, Clone, Copy)]
pub enum Write<'a> {
    Create,
    Update { id: &'a str, prior: &'a AttributeSet },
}

impl Write<'_> {
    /// Id to send; empty on create
    pub fn id(&self) -> String {
        match self {
            Self::Create => String::new(),
            Self::Update { id, .. } => (*id).to_string(),
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }
}

/// Mapping between one kind of remote object and its declarative form
pub trait ObjectMapping: Send + Sync + 'static {
    type Object: Serialize + DeserializeOwned;

    /// Kind name in manifests and state
    const NAME: &'static str;
    const KIND: ObjectKind;

    /// Write-only attributes the API never returns
    const SENSITIVE: &'static [&'static str] = &[];

    /// Extra `get` parameters for reading one object
    fn select() -> Value {
        Value::Null
    }

    /// Parse `desired` into the request object
    ///
    /// Violations are recorded on `reader`; the returned object is only
    /// sent when there are none.
    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, policy: UnknownTokenPolicy) -> Self::Object;

    /// Populate the declarative state from a remote object
    fn to_declarative(session: &Session<'_>, object: &Self::Object, state: &mut StateWriter);
}

/// Parse `desired` for `write`, failing with every violation found
pub fn build<M: ObjectMapping>(
    desired: &AttributeSet,
    write: Write<'_>,
    policy: UnknownTokenPolicy,
) -> Result<M::Object> {
    let mut reader = AttributeReader::new(desired);
    let object = M::to_remote(&mut reader, write, policy);
    Ok(reader.finish(object)?)
}

/// Copy write-only attributes from `prior` into `state`
pub fn carry_sensitive(names: &[&str], prior: &AttributeSet, state: &mut AttributeSet) {
    for name in names {
        if let Some(value) = prior.get(name).filter(|v| !v.is_null()) {
            state.insert(*name, value.clone());
        }
    }
}

/// [`Resource`] over an [`ObjectMapping`]
pub struct Managed<M> {
    provider: Provider,
    mapping: PhantomData<fn() -> M>,
}

impl<M: ObjectMapping> Managed<M> {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            mapping: PhantomData,
        }
    }

    fn read_once(&self, session: &Session<'_>, id: &str, prior: &AttributeSet) -> Result<Applied> {
        let object: M::Object = session.api()?.get_one(M::KIND, id, M::select())?;

        let mut writer = StateWriter::new();
        M::to_declarative(session, &object, &mut writer);
        let (mut state, diagnostics) = writer.finish();
        carry_sensitive(M::SENSITIVE, prior, &mut state);

        log::debug!("Read {} {id}: {} attributes", M::NAME, state.len());
        Ok(Applied {
            id: id.to_string(),
            state,
            diagnostics,
        })
    }
}

impl<M: ObjectMapping> Resource for Managed<M> {
    type Error = Error;

    fn resource_type(&self) -> &'static str {
        M::NAME
    }

    fn create(&self, ctx: &OperationContext, desired: &AttributeSet) -> Result<Applied> {
        let session = self.provider.session(ctx);
        let object = build::<M>(desired, Write::Create, session.enum_policy())?;
        orchestrator::create_then_read(
            &session,
            || Ok(session.api()?.create(M::KIND, &object)?),
            |id| self.read_once(&session, id, desired),
        )
    }

    fn read(&self, ctx: &OperationContext, id: &str, prior: &AttributeSet) -> Result<Applied> {
        let session = self.provider.session(ctx);
        orchestrator::retry(ctx, session.retry(), || self.read_once(&session, id, prior))
    }

    fn update(&self, ctx: &OperationContext, id: &str, desired: &AttributeSet, prior: &AttributeSet) -> Result<Applied> {
        let session = self.provider.session(ctx);
        let object = build::<M>(desired, Write::Update { id, prior }, session.enum_policy())?;
        orchestrator::update_then_read(
            &session,
            id,
            || Ok(session.api()?.update(M::KIND, &object)?),
            |id| self.read_once(&session, id, desired),
        )
    }

    fn delete(&self, ctx: &OperationContext, id: &str, _prior: &AttributeSet) -> Result<Diagnostics> {
        let session = self.provider.session(ctx);
        let child = RemoteObjectRef::new(M::KIND, id);
        let remote_delete = |id: &str| -> Result<()> {
            session.api()?.delete(M::KIND, &[id.to_string()])?;
            Ok(())
        };

        if resolver::requires_parent(M::KIND) {
            orchestrator::delete_retry(
                &session,
                &child,
                Some(|c: &RemoteObjectRef| resolver::find_parent(&session, c.kind, &c.id)),
                remote_delete,
            )?;
        } else {
            orchestrator::delete_retry(
                &session,
                &child,
                None::<fn(&RemoteObjectRef) -> Result<resolver::ParentageRecord>>,
                remote_delete,
            )?;
        }
        Ok(Diagnostics::new())
    }
}

type Factory = fn(&Provider) -> BoxedResource<Error>;

fn managed<M: ObjectMapping>(provider: &Provider) -> BoxedResource<Error> {
    Box::new(Managed::<M>::new(provider.clone()))
}

const REGISTRY: &[(&str, Factory)] = &[
    (host::HostMapping::NAME, managed::<host::HostMapping>),
    (host_interface::HostInterfaceMapping::NAME, managed::<host_interface::HostInterfaceMapping>),
    (item::ItemMapping::NAME, managed::<item::ItemMapping>),
    (trigger::TriggerMapping::NAME, managed::<trigger::TriggerMapping>),
    (graph::GraphMapping::NAME, managed::<graph::GraphMapping>),
    (dashboard::DashboardMapping::NAME, managed::<dashboard::DashboardMapping>),
    (proxy::ProxyMapping::NAME, managed::<proxy::ProxyMapping>),
    (user::UserMapping::NAME, managed::<user::UserMapping>),
    (user::UserGroupMapping::NAME, managed::<user::UserGroupMapping>),
    (user::RoleMapping::NAME, managed::<user::RoleMapping>),
    (valuemap::ValueMapMapping::NAME, managed::<valuemap::ValueMapMapping>),
    (mediatype::EmailMapping::NAME, managed::<mediatype::EmailMapping>),
    (mediatype::ScriptMapping::NAME, managed::<mediatype::ScriptMapping>),
    (mediatype::WebhookMapping::NAME, managed::<mediatype::WebhookMapping>),
    (settings::AUTHENTICATION, settings::authentication),
    (settings::HOUSEKEEPING, settings::housekeeping),
];

/// Every kind name a manifest may use
pub fn kinds() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Resource for a kind name, if the kind exists
pub fn resource_for(kind: &str, provider: &Provider) -> Option<BoxedResource<Error>> {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, factory)| factory(provider))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use zabbix_api::mock::ScriptedTransport;

    #[test]
    fn test_every_kind_resolves() {
        let transport = Arc::new(ScriptedTransport::default());
        let provider = crate::session::testing::provider(&transport);
        for kind in kinds() {
            let resource = resource_for(kind, &provider).unwrap();
            assert_eq!(resource.resource_type(), kind);
        }
        assert!(resource_for("action", &provider).is_none());
    }

    #[test]
    fn test_kind_names_are_unique() {
        let names: HashSet<_> = kinds().collect();
        assert_eq!(names.len(), kinds().count());
    }

    #[test]
    fn test_carry_sensitive() {
        let prior = AttributeSet::new().with("password", "s3cret").with("name", "old");
        let mut state = AttributeSet::new().with("name", "new");
        carry_sensitive(&["password", "token"], &prior, &mut state);
        assert_eq!(state.get_str("password"), Some("s3cret"));
        assert_eq!(state.get_str("name"), Some("new"));
        assert!(!state.has("token"));
    }
}
