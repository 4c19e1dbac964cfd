use super::{Outcome, StateChange, Workspace, settle, transition};
use crate::Context;
use crate::error::Error;
use crate::manifest::{Declared, Manifest};
use crate::resource;
use crate::state::TrackedResource;
use crate::ui;
use anyhow::{Context as _, Result};
use declarative::{Applied, ApplyResult, Lifecycle, OperationContext, Resource};
use std::path::Path;

pub fn run(ctx: &Context, file: &Path, jobs: usize) -> Result<()> {
    let manifest = Manifest::load(file)?;
    let mut workspace = Workspace::open(ctx)?;
    let provider = workspace.provider()?;

    if !ctx.quiet {
        ui::header("Applying Manifest");
        ui::kv("Manifest", &file.display().to_string());
        ui::kv("Resources", &manifest.resources.len().to_string());
    }

    let items: Vec<(Declared, Option<TrackedResource>)> = manifest
        .resources
        .into_iter()
        .map(|declared| {
            let tracked = workspace.state.get(&declared.name).cloned();
            (declared, tracked)
        })
        .collect();

    let outcomes = declarative::execute(&items, jobs, |(declared, tracked)| {
        let Some(resource) = resource::resource_for(&declared.kind, &provider) else {
            return Outcome::new(
                &declared.name,
                ApplyResult::Failed {
                    error: format!("unknown kind {}", declared.kind),
                },
                StateChange::Unchanged,
            );
        };
        let op_ctx = workspace.operation_context();
        apply_one(resource.as_ref(), &op_ctx, declared, tracked.as_ref())
    })
    .context("Failed to run apply")?;

    let summary = workspace.record(ctx, outcomes);
    workspace.finish(ctx, &summary)
}

/// Bring one declared instance to its desired state
///
/// Untracked instances are created, tracked ones updated. An instance left
/// `Unknown` by an earlier run is read first so the update starts from the
/// real remote state.
pub fn apply_one(
    resource: &dyn Resource<Error = Error>,
    ctx: &OperationContext,
    declared: &Declared,
    tracked: Option<&TrackedResource>,
) -> Outcome {
    let name = declared.name.as_str();
    match tracked {
        None => create(resource, ctx, declared),
        Some(tracked) if tracked.kind != declared.kind => Outcome::new(
            name,
            ApplyResult::Failed {
                error: format!(
                    "tracked as {}, declared as {}; destroy it before changing its kind",
                    tracked.kind, declared.kind
                ),
            },
            StateChange::Unchanged,
        ),
        Some(tracked) if tracked.is_up_to_date(&declared.kind, &declared.attributes) => {
            Outcome::new(name, ApplyResult::NoChange, StateChange::Unchanged)
        }
        Some(tracked) => update(resource, ctx, declared, tracked.clone()),
    }
}

fn create(resource: &dyn Resource<Error = Error>, ctx: &OperationContext, declared: &Declared) -> Outcome {
    let name = declared.name.as_str();
    let mut tracked = TrackedResource {
        desired: declared.attributes.clone(),
        ..TrackedResource::new(&declared.kind, Lifecycle::Absent)
    };
    if let Err(e) = transition(name, &mut tracked, Lifecycle::Creating) {
        return lifecycle_failure(name, &e);
    }

    match resource.create(ctx, &declared.attributes) {
        Ok(applied) => adopt(name, tracked, applied, ApplyResult::Created),
        Err(error) => unsettled(name, tracked, error),
    }
}

fn update(
    resource: &dyn Resource<Error = Error>,
    ctx: &OperationContext,
    declared: &Declared,
    mut tracked: TrackedResource,
) -> Outcome {
    let name = declared.name.as_str();

    if tracked.lifecycle.needs_refresh() {
        log::info!("{name}: state unknown, refreshing before update");
        match resource.read(ctx, &tracked.id, &tracked.attributes) {
            Ok(applied) => {
                tracked.attributes = applied.state;
                if let Err(e) = transition(name, &mut tracked, Lifecycle::Created) {
                    return lifecycle_failure(name, &e);
                }
            }
            Err(error) => return Outcome::failed(name, &error),
        }
    }

    let prior = tracked.attributes.clone();
    if let Err(e) = transition(name, &mut tracked, Lifecycle::Updating) {
        return lifecycle_failure(name, &e);
    }
    tracked.desired = declared.attributes.clone();

    match resource.update(ctx, &tracked.id, &declared.attributes, &prior) {
        Ok(applied) => adopt(name, tracked, applied, ApplyResult::Updated),
        Err(error) => unsettled(name, tracked, error),
    }
}

/// Record the state read back after a successful mutation
fn adopt(name: &str, mut tracked: TrackedResource, applied: Applied, ok: ApplyResult) -> Outcome {
    if let Err(e) = transition(name, &mut tracked, Lifecycle::Created) {
        return lifecycle_failure(name, &e);
    }
    tracked.id = applied.id;
    tracked.attributes = applied.state;
    settle(name, ok, tracked, applied.diagnostics)
}

/// Handle a failed mutation
///
/// When the mutation went through but could not be read back the instance
/// is tracked as `Unknown`. Any other failure happened before the remote
/// object changed, so the tracked entry stays as it was.
fn unsettled(name: &str, mut tracked: TrackedResource, error: Error) -> Outcome {
    if !error.is_state_unknown() {
        return Outcome::failed(name, &error);
    }
    if let Err(e) = transition(name, &mut tracked, Lifecycle::Unknown) {
        return lifecycle_failure(name, &e);
    }
    if let Error::StateUnknown { id, .. } = &error {
        tracked.id.clone_from(id);
    }
    Outcome {
        advice: Some(error.category().advice()),
        ..Outcome::new(
            name,
            ApplyResult::Unknown {
                error: error.to_string(),
            },
            StateChange::Put(tracked),
        )
    }
}

fn lifecycle_failure(name: &str, error: &declarative::LifecycleError) -> Outcome {
    Outcome::new(
        name,
        ApplyResult::Failed {
            error: error.to_string(),
        },
        StateChange::Unchanged,
    )
}

// ============================================================================
// Tests
// ============================================================================
