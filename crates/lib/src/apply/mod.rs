//! Plan application: the read, patch, conditionally-write driver.
//!
//! Documents are processed one at a time in plan order. A missing file is
//! skipped, a malformed document fails that entry only, and the batch always
//! runs to completion. Nothing here keeps state between documents; each
//! iteration is an independent read-transform-write.

mod types;

use std::fs;

use tracing::{debug, info, warn};

use crate::patch::patch;
use crate::plan::{DocumentRecord, NameStyle, UpdatePlan};

pub use types::{ApplyOptions, ApplyReport, DocumentError, DocumentOutcome, Outcome};

/// Apply every record in the plan against the root directory.
///
/// Returns a report with one outcome per plan entry, in plan order. The
/// driver itself never fails: per-document errors are captured in the
/// report and the caller decides what they mean for the batch.
pub fn apply_plan(plan: &UpdatePlan, options: &ApplyOptions) -> ApplyReport {
  let mut report = ApplyReport {
    outcomes: Vec::with_capacity(plan.len()),
    dry_run: options.dry_run,
  };

  for (rel_path, record) in &plan.documents {
    let outcome = apply_document(rel_path, record, plan.name_style, options);
    if let Outcome::Failed(err) = &outcome {
      warn!(document = %rel_path, error = %err, "document failed");
    }
    report.outcomes.push(DocumentOutcome {
      path: rel_path.clone(),
      outcome,
    });
  }

  info!(
    updated = report.updated(),
    unchanged = report.unchanged(),
    skipped = report.skipped(),
    failed = report.failed(),
    dry_run = options.dry_run,
    "plan applied"
  );

  report
}

fn apply_document(
  rel_path: &str,
  record: &DocumentRecord,
  style: NameStyle,
  options: &ApplyOptions,
) -> Outcome {
  let path = options.root.join(rel_path);

  if !path.exists() {
    debug!(document = %rel_path, "not present, skipping");
    return Outcome::Skipped;
  }

  let text = match fs::read_to_string(&path) {
    Ok(text) => text,
    Err(e) => return Outcome::Failed(e.into()),
  };

  let result = match patch(&text, &record.assignments(style)) {
    Ok(result) => result,
    Err(e) => return Outcome::Failed(e.into()),
  };

  if !result.changed {
    debug!(document = %rel_path, "already up to date");
    return Outcome::Unchanged;
  }

  if !options.dry_run {
    if let Err(e) = fs::write(&path, &result.text) {
      return Outcome::Failed(DocumentError::Io(e));
    }
  }

  debug!(document = %rel_path, dry_run = options.dry_run, "updated");
  Outcome::Updated
}
