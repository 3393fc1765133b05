//! Implementation of the `manisync plan` command (dry-run).
//!
//! Runs the same pipeline as `apply` but never writes anything back. Always
//! exits zero; the output is informational.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use manisync_lib::apply::{ApplyOptions, apply_plan};
use manisync_lib::plan::UpdatePlan;

use crate::output::{self, print_stat, print_success, print_warning};

pub fn cmd_plan(plan_path: &Path, root: &Path, json: bool) -> Result<()> {
  let plan = UpdatePlan::load(plan_path)
    .with_context(|| format!("failed to load plan {}", plan_path.display()))?;
  debug!(plan = %plan_path.display(), documents = plan.len(), "plan loaded");

  let options = ApplyOptions {
    root: root.to_path_buf(),
    dry_run: true,
  };
  let report = apply_plan(&plan, &options);

  if json {
    output::print_json(&output::report_json(&report))?;
    return Ok(());
  }

  for doc in &report.outcomes {
    output::print_outcome(doc, true);
  }

  println!();
  if report.updated() == 0 {
    print_success("No changes would be made");
  } else {
    print_success(&format!("Would update {} document(s)", report.updated()));
  }
  if !report.is_success() {
    print_warning(&format!("{} document(s) would fail", report.failed()));
  }
  print_stat("Unchanged", &report.unchanged().to_string());
  print_stat("Skipped", &report.skipped().to_string());

  Ok(())
}
