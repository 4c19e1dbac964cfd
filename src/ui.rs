use colored::Colorize;
use declarative::{Diagnostics, ExecuteSummary, Severity};

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

// ============================================================================
// Reconciliation Output
// ============================================================================

/// Print the diagnostics collected for one instance
pub fn diagnostics(name: &str, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        let line = match &diagnostic.attribute {
            Some(attr) => format!("{name}: {attr}: {}", diagnostic.summary),
            None => format!("{name}: {}", diagnostic.summary),
        };
        match diagnostic.severity {
            Severity::Error => error(&line),
            Severity::Warning => warn(&line),
        }
    }
}

/// Lines describing the non-zero counters of a summary
pub fn summary_lines(summary: &ExecuteSummary) -> Vec<String> {
    [
        (summary.created, "created"),
        (summary.updated, "updated"),
        (summary.refreshed, "refreshed"),
        (summary.deleted, "deleted"),
        (summary.forgotten, "forgotten"),
        (summary.no_change, "unchanged"),
        (summary.unknown, "in unknown state"),
        (summary.failed, "failed"),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, what)| format!("{count} {} {what}", if count == 1 { "resource" } else { "resources" }))
    .collect()
}

/// Print final summary
pub fn summary(summary: &ExecuteSummary) {
    println!();
    if summary.is_success() {
        println!("  {} Completed successfully", "✓".green().bold());
    } else {
        println!("  {} Completed with errors", "⚠".yellow().bold());
    }
    for line in summary_lines(summary) {
        println!("    • {line}");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::ApplyResult;

    #[test]
    fn test_summary_lines_skip_zero_counters() {
        let mut summary = ExecuteSummary::default();
        summary.add_result(&ApplyResult::Created);
        summary.add_result(&ApplyResult::Created);
        summary.add_result(&ApplyResult::Failed { error: "boom".into() });

        assert_eq!(
            summary_lines(&summary),
            vec!["2 resources created".to_string(), "1 resource failed".to_string()]
        );
    }

    #[test]
    fn test_empty_summary_has_no_lines() {
        assert!(summary_lines(&ExecuteSummary::default()).is_empty());
    }
}
