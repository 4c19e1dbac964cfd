use super::Workspace;
use crate::Context;
use crate::state::TrackedResource;
use crate::ui;
use anyhow::Result;
use colored::Colorize;
use declarative::Lifecycle;

pub fn run(ctx: &Context, name: Option<&str>) -> Result<()> {
    let workspace = Workspace::open(ctx)?;
    let state = &workspace.state;

    if let Some(name) = name {
        let Some(tracked) = state.get(name) else {
            anyhow::bail!("{name} is not tracked in {}", state.path().display());
        };
        ui::header(name);
        ui::kv("kind", &tracked.kind);
        ui::kv("id", &tracked.id);
        ui::kv("lifecycle", &tracked.lifecycle.to_string());
        ui::kv("updated", &tracked.updated_at.to_rfc3339());
        println!("{}", serde_json::to_string_pretty(&tracked.attributes)?);
        return Ok(());
    }

    ui::header("Tracked Resources");
    ui::kv("State file", &state.path().display().to_string());
    if state.resources.is_empty() {
        ui::dim("(none)");
        return Ok(());
    }

    println!();
    for (name, tracked) in &state.resources {
        println!("  {}", line(name, tracked));
    }
    if ctx.verbose > 0 {
        ui::dim(&format!("last updated {}", state.last_updated.to_rfc3339()));
    }
    Ok(())
}

fn line(name: &str, tracked: &TrackedResource) -> String {
    let lifecycle = match tracked.lifecycle {
        Lifecycle::Created => tracked.lifecycle.to_string().green(),
        Lifecycle::Unknown => tracked.lifecycle.to_string().yellow(),
        _ => tracked.lifecycle.to_string().red(),
    };
    format!("{:<24} {:<24} {:>10}  {lifecycle}", name.bold(), tracked.kind, tracked.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_shows_kind_and_id() {
        colored::control::set_override(false);
        let tracked = TrackedResource {
            id: "10084".into(),
            ..TrackedResource::new("host", Lifecycle::Created)
        };
        let line = line("web01", &tracked);
        assert!(line.starts_with("web01"), "{line}");
        assert!(line.contains("host"), "{line}");
        assert!(line.contains("10084"), "{line}");
        assert!(line.ends_with("created"), "{line}");
    }
}
