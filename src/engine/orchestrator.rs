//! Mutation orchestration with retry
//!
//! Every mutating call runs through the provider's [`RetryConfig`]: an
//! object written a moment ago may not be visible yet, which the API layer
//! reports as a retryable `NotFound`. After a create or update the state is
//! always read back; when that read fails the remote object exists in a
//! state nobody recorded, which is reported as [`Error::StateUnknown`].

use crate::error::{Error, Result};
use crate::resolver::ParentageRecord;
use crate::session::Session;
use declarative::{Applied, LogCallback, OperationContext, RetryConfig, with_retry};
use zabbix_api::RemoteObjectRef;

/// Run `op` under `policy`, retrying transient failures
pub fn retry<T, F>(ctx: &OperationContext, policy: &RetryConfig, op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    Ok(with_retry(ctx, policy, Some(&LogCallback), op)?)
}

/// Retry a mutation that yields the id of the object it touched
pub fn perform_retry<F>(ctx: &OperationContext, policy: &RetryConfig, op: F) -> Result<String>
where
    F: FnMut() -> Result<String>,
{
    retry(ctx, policy, op)
}

fn read_back<R>(session: &Session<'_>, id: &str, read: R) -> Result<Applied>
where
    R: FnMut(&str) -> Result<Applied>,
{
    let mut read = read;
    retry(session.ctx, session.retry(), || read(id)).map_err(|source| Error::StateUnknown {
        id: id.to_string(),
        source: Box::new(source),
    })
}

/// Create an object, then read it back
pub fn create_then_read<C, R>(session: &Session<'_>, create: C, read: R) -> Result<Applied>
where
    C: FnMut() -> Result<String>,
    R: FnMut(&str) -> Result<Applied>,
{
    let id = perform_retry(session.ctx, session.retry(), create)?;
    log::info!("Created remote object {id}");
    read_back(session, &id, read)
}

/// Update the object `id`, then read it back
pub fn update_then_read<U, R>(session: &Session<'_>, id: &str, update: U, read: R) -> Result<Applied>
where
    U: FnMut() -> Result<String>,
    R: FnMut(&str) -> Result<Applied>,
{
    let updated = perform_retry(session.ctx, session.retry(), update)?;
    if updated != id {
        log::warn!("Update of {id} reported id {updated}");
    }
    log::info!("Updated remote object {id}");
    read_back(session, id, read)
}

/// Delete `child`, resolving its owner first when `resolve_parent` is given
///
/// Both steps run under the retry policy. Returns the owner that was
/// resolved, if any.
pub fn delete_retry<P, D>(
    session: &Session<'_>,
    child: &RemoteObjectRef,
    resolve_parent: Option<P>,
    remote_delete: D,
) -> Result<Option<ParentageRecord>>
where
    P: FnMut(&RemoteObjectRef) -> Result<ParentageRecord>,
    D: FnMut(&str) -> Result<()>,
{
    let parent = match resolve_parent {
        Some(mut resolve) => {
            let record = retry(session.ctx, session.retry(), || resolve(child))?;
            log::info!(
                "Deleting {child} from host {} ({})",
                record.parent_name,
                record.parent_id
            );
            Some(record)
        }
        None => None,
    };

    let mut remote_delete = remote_delete;
    retry(session.ctx, session.retry(), || remote_delete(&child.id))?;
    log::info!("Deleted {child}");
    Ok(parent)
}
