use colored::{ColoredString, Colorize};
use reconcile::{Changes, Outcome, ReconcileResult, RunSummary};
use serde_json::Value;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
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

// ============================================================================
// Results
// ============================================================================

const MAX_VALUE_WIDTH: usize = 72;

fn outcome_glyph(outcome: Outcome) -> ColoredString {
    match outcome {
        Outcome::AlreadyMatching => "✓".green(),
        Outcome::Applied => "✓".green().bold(),
        Outcome::DryRunPending => "~".yellow(),
        Outcome::Failed => "✗".red(),
        Outcome::UriUnresolved => "?".red(),
    }
}

fn outcome_label(outcome: Outcome) -> ColoredString {
    let label = outcome.as_str();
    match outcome {
        Outcome::AlreadyMatching => label.dimmed(),
        Outcome::Applied => label.green(),
        Outcome::DryRunPending => label.yellow(),
        Outcome::Failed | Outcome::UriUnresolved => label.red(),
    }
}

/// Print one reconciliation result with its changes
pub fn result(result: &ReconcileResult) {
    println!(
        "{} {} {}",
        outcome_glyph(result.outcome),
        result.name.as_str().bold(),
        outcome_label(result.outcome)
    );
    dim(&result.message);
    if let (Some(uri), Some(source)) = (&result.uri, result.source) {
        dim(&format!("{source} URI: {uri}"));
    }
    for line in change_lines(&result.changes) {
        println!("{line}");
    }
}

/// Render changes as `+`/`-`/`~` lines
pub fn change_lines(changes: &Changes) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(added) = &changes.added {
        for (path, value) in added {
            lines.push(format!("    {} {}: {}", "+".green(), path, format_value(value)));
        }
    }
    if let Some(removed) = &changes.removed {
        for (path, value) in removed {
            lines.push(format!("    {} {}: {}", "-".red(), path, format_value(value)));
        }
    }
    if let Some(changed) = &changes.changed {
        for (path, change) in changed {
            lines.push(format!(
                "    {} {}: {} → {}",
                "~".yellow(),
                path,
                format_value(&change.old_value),
                format_value(&change.new_value)
            ));
        }
    }

    lines
}

/// Print the run summary line
pub fn summary(summary: &RunSummary, dry_run: bool) {
    println!();
    let mut parts = Vec::new();
    if dry_run {
        parts.push(format!("{} pending", summary.pending));
    } else {
        parts.push(format!("{} applied", summary.applied));
    }
    parts.push(format!("{} unchanged", summary.already_matching));
    if summary.failed > 0 {
        parts.push(format!("{} failed", summary.failed));
    }
    if summary.unresolved > 0 {
        parts.push(format!("{} unresolved", summary.unresolved));
    }

    let line = parts.join(", ");
    if summary.is_success() {
        success(&line);
    } else {
        error(&line);
    }
}

/// Compact single-line JSON, truncated for display
pub fn format_value(value: &Value) -> String {
    truncate(&value.to_string(), MAX_VALUE_WIDTH)
}

/// Truncate a string to `max_len` characters, keeping the start
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let kept: String = text.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use reconcile::{build_result, diff, Method};
    use serde_json::json;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("abcdef", 3), "...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("→→→→→→", 5), "→→...");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(format_value(&json!("text")), r#""text""#);
        let long = json!("x".repeat(200));
        assert_eq!(format_value(&long).chars().count(), MAX_VALUE_WIDTH);
    }

    #[test]
    fn test_change_lines() {
        colored::control::set_override(false);
        let result = build_result(
            "iface",
            Outcome::DryRunPending,
            Some(diff(
                &json!({"mtu": 1500, "old": 1}),
                &json!({"mtu": 9000, "description": "uplink"}),
            )),
            Some(Method::Put),
            "pending",
        );

        let lines = change_lines(&result.changes);
        assert_eq!(
            lines,
            vec![
                r#"    + description: "uplink""#.to_string(),
                "    - old: 1".to_string(),
                "    ~ mtu: 1500 → 9000".to_string(),
            ]
        );
    }
}
