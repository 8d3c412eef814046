//! Progress indicators for rconf.

use indicatif::{ProgressBar, ProgressStyle};
use reconcile::{ProgressCallback, ReconcileResult};
use std::time::Duration;

use crate::ui;

/// Create a spinner with a message
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Shows a spinner while each state is reconciled, then prints its result
///
/// In quiet mode there is no spinner and only failed or unresolved results
/// are printed.
pub struct StateProgress {
    total: usize,
    done: usize,
    quiet: bool,
    current: Option<ProgressBar>,
}

impl StateProgress {
    pub fn new(total: usize, quiet: bool) -> Self {
        Self {
            total,
            done: 0,
            quiet,
            current: None,
        }
    }

    fn shows(&self, result: &ReconcileResult) -> bool {
        !self.quiet || result.is_success() == Some(false)
    }
}

impl ProgressCallback for StateProgress {
    fn on_start(&mut self, name: &str) {
        if self.quiet {
            log::debug!("reconciling {name}");
            return;
        }
        let msg = format!("[{}/{}] {}", self.done + 1, self.total, name);
        self.current = Some(spinner(&msg));
    }

    fn on_complete(&mut self, result: &ReconcileResult) {
        if let Some(pb) = self.current.take() {
            pb.finish_and_clear();
        }
        self.done += 1;
        if self.shows(result) {
            ui::result(result);
        } else {
            log::debug!("{}: {}", result.name, result.outcome);
        }
    }
}

/// Silent progress for machine-readable output
pub struct Quiet;

impl ProgressCallback for Quiet {
    fn on_start(&mut self, name: &str) {
        log::debug!("reconciling {name}");
    }

    fn on_complete(&mut self, result: &ReconcileResult) {
        log::debug!("{}: {}", result.name, result.outcome);
    }
}
