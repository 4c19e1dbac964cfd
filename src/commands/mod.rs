//! Command implementations
//!
//! Reconciling commands build one [`Outcome`] per instance, possibly in
//! parallel, then fold the outcomes into the state file on the main thread.

pub mod apply;
pub mod destroy;
pub mod lookup;
pub mod refresh;
pub mod state;

use crate::Context;
use crate::config::ProviderConfig;
use crate::error::Error;
use crate::session::Provider;
use crate::state::{StateFile, TrackedResource};
use crate::ui;
use anyhow::{Result, bail};
use declarative::{ApplyResult, Diagnostics, ExecuteSummary, Lifecycle, LifecycleError, OperationContext, Severity};

/// What happens to the tracked entry of an instance
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Unchanged,
    Put(TrackedResource),
    Remove,
}

/// Result of reconciling one instance
#[derive(Debug, Clone)]
pub struct Outcome {
    pub name: String,
    pub result: ApplyResult,
    pub change: StateChange,
    pub diagnostics: Diagnostics,
    /// Hint printed below a failure
    pub advice: Option<&'static str>,
}

impl Outcome {
    pub fn new(name: &str, result: ApplyResult, change: StateChange) -> Self {
        Self {
            name: name.to_string(),
            result,
            change,
            diagnostics: Diagnostics::new(),
            advice: None,
        }
    }

    /// Failure that leaves the tracked entry as it was
    pub fn failed(name: &str, error: &Error) -> Self {
        Self {
            advice: Some(error.category().advice()),
            ..Self::new(
                name,
                ApplyResult::Failed {
                    error: error.to_string(),
                },
                StateChange::Unchanged,
            )
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// Settle an instance whose state was just read
///
/// Field errors fail the instance but the fields that could be read are
/// still recorded; warnings are printed alongside.
pub fn settle(name: &str, ok: ApplyResult, tracked: TrackedResource, diagnostics: Diagnostics) -> Outcome {
    if !diagnostics.has_errors() {
        return Outcome::new(name, ok, StateChange::Put(tracked)).with_diagnostics(diagnostics);
    }

    let mut partial = Diagnostics::new();
    let mut rest = Diagnostics::new();
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Error => partial.push(diagnostic),
            Severity::Warning => rest.push(diagnostic),
        }
    }

    let error = Error::PartialFieldErrors { diagnostics: partial };
    Outcome {
        change: StateChange::Put(tracked),
        ..Outcome::failed(name, &error)
    }
    .with_diagnostics(rest)
}

/// Move `tracked` to `to`, logging the transition
pub fn transition(name: &str, tracked: &mut TrackedResource, to: Lifecycle) -> Result<(), LifecycleError> {
    let from = tracked.lifecycle;
    tracked.lifecycle = from.transition(to)?;
    if from != to {
        log::info!("{name}: {from} -> {to}");
    }
    Ok(())
}

// ============================================================================
// Workspace
// ============================================================================

/// Loaded config and state for one command
pub struct Workspace {
    pub config: ProviderConfig,
    pub state: StateFile,
}

impl Workspace {
    pub fn open(ctx: &Context) -> Result<Self> {
        let config = ProviderConfig::load(ctx.config.as_deref())?;
        let path = match &ctx.state_file {
            Some(path) => path.clone(),
            None => config.state_path()?,
        };
        let state = StateFile::load(&path)?;
        Ok(Self { config, state })
    }

    pub fn provider(&self) -> Result<Provider> {
        self.config.provider()
    }

    /// Context for one instance operation, retries included
    pub fn operation_context(&self) -> OperationContext {
        self.config
            .operation_timeout()
            .map_or_else(OperationContext::new, OperationContext::with_timeout)
    }

    /// Fold outcomes into the state, printing each one
    pub fn record(&mut self, ctx: &Context, outcomes: Vec<Outcome>) -> ExecuteSummary {
        let mut summary = ExecuteSummary::default();
        for outcome in outcomes {
            report(ctx, &outcome);
            summary.add_result(&outcome.result);
            match outcome.change {
                StateChange::Unchanged => {}
                StateChange::Put(tracked) => self.state.put(&outcome.name, tracked),
                StateChange::Remove => {
                    self.state.remove(&outcome.name);
                }
            }
        }
        summary
    }

    /// Save state and print the summary; failures make the command fail
    pub fn finish(mut self, ctx: &Context, summary: &ExecuteSummary) -> Result<()> {
        self.state.save()?;
        if !ctx.quiet {
            ui::summary(summary);
        }
        if !summary.is_success() {
            bail!(
                "{} of {} resources did not reconcile",
                summary.failed + summary.unknown,
                summary.total()
            );
        }
        Ok(())
    }
}

fn report(ctx: &Context, outcome: &Outcome) {
    let name = outcome.name.as_str();
    match &outcome.result {
        ApplyResult::NoChange => {
            if ctx.verbose > 0 {
                ui::dim(&format!("{name}: up to date"));
            }
        }
        ApplyResult::Created => ui::success(&format!("{name}: created")),
        ApplyResult::Updated => ui::success(&format!("{name}: updated")),
        ApplyResult::Refreshed => ui::success(&format!("{name}: refreshed")),
        ApplyResult::Deleted => ui::success(&format!("{name}: deleted")),
        ApplyResult::Forgotten => ui::info(&format!("{name}: removed from state")),
        ApplyResult::Unknown { error } => ui::warn(&format!("{name}: state unknown: {error}")),
        ApplyResult::Failed { error } => ui::error(&format!("{name}: {error}")),
    }
    ui::diagnostics(name, &outcome.diagnostics);
    if let Some(advice) = outcome.advice.filter(|_| !outcome.result.is_success()) {
        ui::dim(advice);
    }
}

// ============================================================================
// Tests
// ============================================================================
