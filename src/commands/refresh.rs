use super::{Outcome, StateChange, Workspace, settle, transition};
use crate::Context;
use crate::error::Error;
use crate::resource;
use crate::state::TrackedResource;
use crate::ui;
use anyhow::{Context as _, Result, bail};
use declarative::{ApplyResult, Lifecycle, OperationContext, Resource};

pub fn run(ctx: &Context, name: Option<&str>, jobs: usize) -> Result<()> {
    let mut workspace = Workspace::open(ctx)?;
    let items: Vec<(String, TrackedResource)> = match name {
        Some(name) => {
            let Some(tracked) = workspace.state.get(name) else {
                bail!("{name} is not tracked in {}", workspace.state.path().display());
            };
            vec![(name.to_string(), tracked.clone())]
        }
        None => workspace.state.resources.clone().into_iter().collect(),
    };

    if items.is_empty() {
        ui::info("No tracked resources");
        return Ok(());
    }
    let provider = workspace.provider()?;
    if !ctx.quiet {
        ui::header("Refreshing State");
    }

    let outcomes = declarative::execute(&items, jobs, |(name, tracked)| {
        match resource::resource_for(&tracked.kind, &provider) {
            Some(resource) => refresh_one(resource.as_ref(), &workspace.operation_context(), name, tracked),
            None => Outcome::new(
                name,
                ApplyResult::Failed {
                    error: format!("unknown kind {}", tracked.kind),
                },
                StateChange::Unchanged,
            ),
        }
    })
    .context("Failed to run refresh")?;

    let summary = workspace.record(ctx, outcomes);
    workspace.finish(ctx, &summary)
}

/// Read one tracked instance back into state
///
/// A successful read settles an `Unknown` instance as `Created`.
pub fn refresh_one(
    resource: &dyn Resource<Error = Error>,
    ctx: &OperationContext,
    name: &str,
    tracked: &TrackedResource,
) -> Outcome {
    match resource.read(ctx, &tracked.id, &tracked.attributes) {
        Ok(applied) => {
            let mut tracked = tracked.clone();
            if let Err(e) = transition(name, &mut tracked, Lifecycle::Created) {
                return Outcome::new(
                    name,
                    ApplyResult::Failed { error: e.to_string() },
                    StateChange::Unchanged,
                );
            }
            tracked.attributes = applied.state;
            settle(name, ApplyResult::Refreshed, tracked, applied.diagnostics)
        }
        Err(error) => Outcome::failed(name, &error),
    }
}
