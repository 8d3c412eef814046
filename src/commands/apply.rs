//! Apply and diff commands
//!
//! - `apply` - make device config match every state in a state file
//! - `diff` - preview what apply would change, without writing

use anyhow::{bail, Context as AnyhowContext, Result};
use reconcile::{reconcile_all, ReconcileResult, RunSummary};
use restconf::RestconfClient;
use serde::Serialize;

use crate::cli::{OutputFormat, RunArgs};
use crate::config::{self, StateFile};
use crate::progress::{Quiet, StateProgress};
use crate::ui;
use crate::Context;

/// Machine-readable run report
#[derive(Debug, Serialize)]
struct Report {
    dry_run: bool,
    device: String,
    results: Vec<ReconcileResult>,
    summary: RunSummary,
}

pub fn run(ctx: &Context, args: &RunArgs, dry_run: bool) -> Result<()> {
    let file = StateFile::load(&args.file)?;
    let requests = file.select(args.only.as_deref())?;
    let device = config::resolve_device(file.device.as_ref(), &args.device)?;
    let host = device.host.clone();
    let client = RestconfClient::new(device).context("Invalid device settings")?;

    let summary = match args.format {
        OutputFormat::Text => {
            if !ctx.quiet {
                let verb = if dry_run { "Diff" } else { "Apply" };
                ui::header(&format!("{verb}: {} state(s) on {host}", requests.len()));
            }
            let mut progress = StateProgress::new(requests.len(), ctx.quiet);
            let (_, summary) = reconcile_all(&requests, &client, dry_run, &mut progress);
            if !ctx.quiet {
                ui::summary(&summary, dry_run);
            }
            summary
        }
        OutputFormat::Json => {
            let (results, summary) = reconcile_all(&requests, &client, dry_run, &mut Quiet);
            let report = Report {
                dry_run,
                device: host,
                results,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            report.summary
        }
    };

    if !summary.is_success() {
        bail!(
            "{} of {} state(s) did not converge",
            summary.failed + summary.unresolved,
            summary.total()
        );
    }
    Ok(())
}
