//! Types for plan application.
//!
//! This module defines the per-document outcome taxonomy, the options for
//! a run, and the report the driver hands back.

use std::path::PathBuf;

use thiserror::Error;

use crate::patch::PatchError;

/// Why a document could not be brought up to date.
#[derive(Debug, Error)]
pub enum DocumentError {
  /// The document is structurally unpatchable.
  #[error("malformed document: {0}")]
  Malformed(#[from] PatchError),

  /// Reading or writing the document failed.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Outcome of processing one plan entry.
#[derive(Debug)]
pub enum Outcome {
  /// The document file does not exist under the root. Expected: not every
  /// environment carries every artifact.
  Skipped,

  /// The document already satisfied its record byte-for-byte.
  Unchanged,

  /// The document was rewritten (or would be, in dry-run mode).
  Updated,

  /// The document could not be processed.
  Failed(DocumentError),
}

impl Outcome {
  pub fn is_failed(&self) -> bool {
    matches!(self, Outcome::Failed(_))
  }
}

/// One processed plan entry.
#[derive(Debug)]
pub struct DocumentOutcome {
  /// Path relative to the configured root, as written in the plan.
  pub path: String,

  /// What happened to the document.
  pub outcome: Outcome,
}

/// Options for plan application.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
  /// Directory the plan's relative paths resolve against.
  pub root: PathBuf,

  /// Compute outcomes without writing anything back.
  pub dry_run: bool,
}

/// Result of applying a plan.
#[derive(Debug, Default)]
pub struct ApplyReport {
  /// Per-document outcomes, in plan iteration order.
  pub outcomes: Vec<DocumentOutcome>,

  /// Whether this report came from a dry run.
  pub dry_run: bool,
}

impl ApplyReport {
  /// Documents that were (or would be) rewritten.
  pub fn updated(&self) -> usize {
    self.count(|o| matches!(o, Outcome::Updated))
  }

  /// Documents that already matched their records.
  pub fn unchanged(&self) -> usize {
    self.count(|o| matches!(o, Outcome::Unchanged))
  }

  /// Documents missing from the root directory.
  pub fn skipped(&self) -> usize {
    self.count(|o| matches!(o, Outcome::Skipped))
  }

  /// Documents that failed to patch or write.
  pub fn failed(&self) -> usize {
    self.count(|o| o.is_failed())
  }

  /// Total number of plan entries processed.
  pub fn total(&self) -> usize {
    self.outcomes.len()
  }

  /// True when no document failed. Skipped and unchanged documents never
  /// count against the batch.
  pub fn is_success(&self) -> bool {
    self.failed() == 0
  }

  fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
    self.outcomes.iter().filter(|d| pred(&d.outcome)).count()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn outcome(path: &str, outcome: Outcome) -> DocumentOutcome {
    DocumentOutcome {
      path: path.to_string(),
      outcome,
    }
  }

  #[test]
  fn empty_report_is_success() {
    let report = ApplyReport::default();
    assert!(report.is_success());
    assert_eq!(report.total(), 0);
  }

  #[test]
  fn counters_partition_the_outcomes() {
    let report = ApplyReport {
      outcomes: vec![
        outcome("a.xml", Outcome::Updated),
        outcome("b.xml", Outcome::Unchanged),
        outcome("c.xml", Outcome::Skipped),
        outcome("d.xml", Outcome::Updated),
      ],
      dry_run: false,
    };

    assert_eq!(report.updated(), 2);
    assert_eq!(report.unchanged(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.total(), 4);
    assert!(report.is_success());
  }

  #[test]
  fn a_failed_document_fails_the_report() {
    let report = ApplyReport {
      outcomes: vec![
        outcome("a.xml", Outcome::Updated),
        outcome(
          "b.xml",
          Outcome::Failed(DocumentError::Malformed(PatchError::MissingRoot)),
        ),
      ],
      dry_run: false,
    };

    assert_eq!(report.failed(), 1);
    assert!(!report.is_success());
  }

  #[test]
  fn skipped_documents_do_not_fail_the_report() {
    let report = ApplyReport {
      outcomes: vec![outcome("a.xml", Outcome::Skipped)],
      dry_run: false,
    };
    assert!(report.is_success());
  }
}
