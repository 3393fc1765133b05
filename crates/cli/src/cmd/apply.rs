//! Implementation of the `manisync apply` command.
//!
//! Loads the update plan, runs the driver against the root directory, and
//! prints one line per document plus a summary block. The batch always runs
//! to completion; the exit code reflects whether any document failed.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use manisync_lib::apply::{ApplyOptions, apply_plan};
use manisync_lib::plan::UpdatePlan;

use crate::output::{self, print_stat, print_success, print_warning};

pub fn cmd_apply(plan_path: &Path, root: &Path, json: bool) -> Result<()> {
  let plan = UpdatePlan::load(plan_path)
    .with_context(|| format!("failed to load plan {}", plan_path.display()))?;
  debug!(plan = %plan_path.display(), documents = plan.len(), "plan loaded");

  let options = ApplyOptions {
    root: root.to_path_buf(),
    dry_run: false,
  };
  let report = apply_plan(&plan, &options);

  if json {
    output::print_json(&output::report_json(&report))?;
  } else {
    for doc in &report.outcomes {
      output::print_outcome(doc, false);
    }

    println!();
    if report.is_success() {
      print_success("Apply complete");
    } else {
      print_warning(&format!("Apply finished with {} failure(s)", report.failed()));
    }
    print_stat("Updated", &report.updated().to_string());
    print_stat("Unchanged", &report.unchanged().to_string());
    print_stat("Skipped", &report.skipped().to_string());
    print_stat("Failed", &report.failed().to_string());
  }

  if !report.is_success() {
    bail!("{} document(s) failed", report.failed());
  }

  Ok(())
}
