//! Resource trait for declarative state management
//!
//! A Resource maps one kind of remote object to and from a declarative
//! attribute set. Implementations are stateless apart from the client they
//! talk through, so one value serves every instance of its kind.

use crate::attributes::AttributeSet;
use crate::context::OperationContext;
use crate::diagnostics::Diagnostics;
use crate::types::Applied;

/// Core trait for declarative resources
///
/// Every operation receives the [`OperationContext`] of the surrounding
/// command and must check it before talking to the remote side. Create and
/// update return the state read back after the mutation, not the caller's
/// input, so computed attributes are filled in.
pub trait Resource: Send + Sync {
    type Error;

    /// Kind name used in manifests and state, e.g. `host`
    fn resource_type(&self) -> &'static str;

    fn create(&self, ctx: &OperationContext, desired: &AttributeSet) -> Result<Applied, Self::Error>;

    /// Read the remote object
    ///
    /// `prior` is the last known state; write-only attributes the remote
    /// side never returns are carried over from it.
    fn read(&self, ctx: &OperationContext, id: &str, prior: &AttributeSet) -> Result<Applied, Self::Error>;

    fn update(
        &self,
        ctx: &OperationContext,
        id: &str,
        desired: &AttributeSet,
        prior: &AttributeSet,
    ) -> Result<Applied, Self::Error>;

    /// Delete the remote object; warnings go into the returned batch
    fn delete(&self, ctx: &OperationContext, id: &str, prior: &AttributeSet) -> Result<Diagnostics, Self::Error>;
}

/// Boxed resource
pub type BoxedResource<E> = Box<dyn Resource<Error = E>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory resource used to exercise the trait contract
    #[derive(Default)]
    struct MemoryResource {
        objects: Mutex<BTreeMap<String, AttributeSet>>,
    }

    impl Resource for MemoryResource {
        type Error = String;

        fn resource_type(&self) -> &'static str {
            "memory"
        }

        fn create(&self, ctx: &OperationContext, desired: &AttributeSet) -> Result<Applied, String> {
            let id = {
                let mut objects = self.objects.lock().unwrap();
                let id = (objects.len() + 1).to_string();
                objects.insert(id.clone(), desired.clone());
                id
            };
            self.read(ctx, &id, desired)
        }

        fn read(&self, ctx: &OperationContext, id: &str, _prior: &AttributeSet) -> Result<Applied, String> {
            ctx.check().map_err(|e| e.to_string())?;
            let objects = self.objects.lock().unwrap();
            let state = objects.get(id).cloned().ok_or_else(|| format!("{id} not found"))?;
            Ok(Applied {
                id: id.to_string(),
                state,
                diagnostics: Diagnostics::new(),
            })
        }

        fn update(
            &self,
            ctx: &OperationContext,
            id: &str,
            desired: &AttributeSet,
            prior: &AttributeSet,
        ) -> Result<Applied, String> {
            self.objects
                .lock()
                .unwrap()
                .insert(id.to_string(), desired.clone());
            self.read(ctx, id, prior)
        }

        fn delete(&self, _ctx: &OperationContext, id: &str, _prior: &AttributeSet) -> Result<Diagnostics, String> {
            self.objects.lock().unwrap().remove(id);
            Ok(Diagnostics::new())
        }
    }

    #[test]
    fn test_trait_object_round_trip() {
        let resource: BoxedResource<String> = Box::new(MemoryResource::default());
        let ctx = OperationContext::new();
        let desired = AttributeSet::new().with("name", "x");

        let created = resource.create(&ctx, &desired).unwrap();
        assert_eq!(created.id, "1");
        assert_eq!(created.state, desired);

        resource.delete(&ctx, &created.id, &created.state).unwrap();
        assert!(resource.read(&ctx, &created.id, &created.state).is_err());
    }
}
