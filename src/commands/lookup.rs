use crate::Context;
use crate::config::ProviderConfig;
use crate::lookup::{self, LookupKind};
use crate::ui;
use anyhow::{Context as _, Result};

pub fn run(ctx: &Context, kind: LookupKind, name: &str) -> Result<()> {
    let config = ProviderConfig::load(ctx.config.as_deref())?;
    let provider = config.provider()?;
    let op_ctx = config
        .operation_timeout()
        .map_or_else(declarative::OperationContext::new, declarative::OperationContext::with_timeout);

    let found = lookup::lookup(&provider.session(&op_ctx), kind, name)
        .with_context(|| format!("Lookup of {kind} \"{name}\" failed"))?;

    if ctx.quiet {
        println!("{}", found.id);
        return Ok(());
    }
    ui::success(&format!("{kind} {name}"));
    ui::kv("id", &found.id);
    if !found.display_name.is_empty() && found.display_name != name {
        ui::kv("visible name", &found.display_name);
    }
    Ok(())
}
