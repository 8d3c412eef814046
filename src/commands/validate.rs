use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::StateFile;
use crate::ui;
use crate::Context;

/// Problems found in a state file, without contacting the device
pub fn check(file: &StateFile) -> Vec<String> {
    let mut problems = Vec::new();

    if file.states.is_empty() {
        problems.push("state file declares no states".to_string());
    }

    for name in file.duplicate_names() {
        problems.push(format!("duplicate state name '{name}'"));
    }

    if let Some(device) = &file.device
        && let Err(e) = device.validate()
    {
        problems.push(format!("[device]: {e}"));
    }

    for (index, state) in file.states.iter().enumerate() {
        if let Err(e) = reconcile::validate(state) {
            let label = if state.name.trim().is_empty() {
                format!("state #{}", index + 1)
            } else {
                format!("state '{}'", state.name)
            };
            problems.push(format!("{label}: {e}"));
        }
    }

    problems
}

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let file = StateFile::load(path)?;
    let problems = check(&file);

    if !ctx.quiet {
        ui::header(&format!("Validate {}", path.display()));
        for state in &file.states {
            let ok = reconcile::validate(state).is_ok();
            let mark = if ok { "✓".green() } else { "✗".red() };
            println!("  {} {} {}", mark, state.name, state.method.as_str().dimmed());
        }
        println!();
    }

    if problems.is_empty() {
        ui::success(&format!("{} state(s) valid", file.states.len()));
        return Ok(());
    }

    for problem in &problems {
        ui::error(problem);
    }
    bail!("{} problem(s) in {}", problems.len(), path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconcile::ReconcileRequest;
    use restconf::DeviceConfig;
    use serde_json::json;

    #[test]
    fn test_check_clean_file() {
        let file = StateFile {
            device: Some(DeviceConfig::new("192.0.2.1")),
            states: vec![ReconcileRequest::new("a", "/a", "PUT", json!({"x": 1}))],
        };
        assert!(check(&file).is_empty());
    }

    #[test]
    fn test_check_reports_every_problem() {
        let file = StateFile {
            device: Some(DeviceConfig::new("")),
            states: vec![
                ReconcileRequest::new("a", "/a", "PUT", json!({"x": 1})),
                ReconcileRequest::new("a", "/a", "PUT", json!({"x": 1})),
                ReconcileRequest::new("", "/b", "PUT", json!({"x": 1})),
                ReconcileRequest::new("c", "/c", "MERGE", json!({"x": 1})),
            ],
        };

        let problems = check(&file);
        assert_eq!(problems.len(), 4);
        assert!(problems.iter().any(|p| p.contains("duplicate state name 'a'")));
        assert!(problems.iter().any(|p| p.starts_with("[device]")));
        assert!(problems.iter().any(|p| p.starts_with("state #3")));
        assert!(problems.iter().any(|p| p.starts_with("state 'c'")));
    }

    #[test]
    fn test_check_empty_file() {
        let problems = check(&StateFile::default());
        assert_eq!(problems, vec!["state file declares no states".to_string()]);
    }
}
