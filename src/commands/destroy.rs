use super::{Outcome, StateChange, Workspace, transition};
use crate::Context;
use crate::error::Error;
use crate::resource::{self, settings};
use crate::state::TrackedResource;
use crate::ui;
use anyhow::{Context as _, Result, bail};
use declarative::{ApplyResult, Lifecycle, OperationContext, Resource};

pub fn run(ctx: &Context, names: &[String], all: bool, jobs: usize) -> Result<()> {
    let mut workspace = Workspace::open(ctx)?;
    let names = if all { workspace.state.names() } else { names.to_vec() };
    if names.is_empty() {
        if all {
            ui::info("No tracked resources");
            return Ok(());
        }
        bail!("Name the resources to destroy, or pass --all");
    }

    let mut items = Vec::with_capacity(names.len());
    for name in names {
        let Some(tracked) = workspace.state.get(&name).cloned() else {
            bail!("{name} is not tracked in {}", workspace.state.path().display());
        };
        items.push((name, tracked));
    }

    let provider = workspace.provider()?;
    if !ctx.quiet {
        ui::header("Destroying Resources");
    }

    let outcomes = declarative::execute(&items, jobs, |(name, tracked)| {
        match resource::resource_for(&tracked.kind, &provider) {
            Some(resource) => destroy_one(resource.as_ref(), &workspace.operation_context(), name, tracked),
            None => Outcome::new(
                name,
                ApplyResult::Failed {
                    error: format!("unknown kind {}", tracked.kind),
                },
                StateChange::Unchanged,
            ),
        }
    })
    .context("Failed to run destroy")?;

    let summary = workspace.record(ctx, outcomes);
    workspace.finish(ctx, &summary)
}

/// Delete one tracked instance and stop tracking it
///
/// Settings singletons are only forgotten.
pub fn destroy_one(
    resource: &dyn Resource<Error = Error>,
    ctx: &OperationContext,
    name: &str,
    tracked: &TrackedResource,
) -> Outcome {
    let mut entry = tracked.clone();
    if let Err(e) = transition(name, &mut entry, Lifecycle::Deleting) {
        return Outcome::new(
            name,
            ApplyResult::Failed { error: e.to_string() },
            StateChange::Unchanged,
        );
    }

    match resource.delete(ctx, &tracked.id, &tracked.attributes) {
        Ok(diagnostics) => {
            log::info!("{name}: {} -> {}", Lifecycle::Deleting, Lifecycle::Absent);
            let result = if settings::is_singleton(&tracked.kind) {
                ApplyResult::Forgotten
            } else {
                ApplyResult::Deleted
            };
            Outcome::new(name, result, StateChange::Remove).with_diagnostics(diagnostics)
        }
        Err(error) => Outcome::failed(name, &error),
    }
}
