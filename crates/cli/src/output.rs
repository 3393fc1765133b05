//! CLI output formatting utilities.
//!
//! Consistent terminal output for the report: colored status symbols, one
//! line per document, and a JSON rendering for `--json`.

use anyhow::Context;
use manisync_lib::apply::{ApplyReport, DocumentOutcome, Outcome};
use owo_colors::{OwoColorize, Stream, Style};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const CHANGE: &str = "~";
  pub const SKIP: &str = "-";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// One line per document: symbol, path, outcome.
pub fn print_outcome(doc: &DocumentOutcome, dry_run: bool) {
  match &doc.outcome {
    Outcome::Updated => {
      let label = if dry_run { "would update" } else { "updated" };
      println!(
        "  {} {} {}",
        symbols::CHANGE.if_supports_color(Stream::Stdout, |s| s.style(Style::new().yellow().bold())),
        doc.path,
        format!("({label})").if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
    }
    Outcome::Unchanged => {
      println!(
        "  {} {} {}",
        symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
        doc.path,
        "(unchanged)".if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
    }
    Outcome::Skipped => {
      println!(
        "  {} {} {}",
        symbols::SKIP.if_supports_color(Stream::Stdout, |s| s.dimmed()),
        doc.path,
        "(skipped, not found)".if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
    }
    Outcome::Failed(err) => {
      println!(
        "  {} {} {}",
        symbols::ERROR.if_supports_color(Stream::Stdout, |s| s.style(Style::new().red().bold())),
        doc.path,
        format!("(failed: {err})").if_supports_color(Stream::Stdout, |s| s.red())
      );
    }
  }
}

/// The report as a JSON value, errors rendered as strings.
pub fn report_json(report: &ApplyReport) -> serde_json::Value {
  let documents: Vec<_> = report
    .outcomes
    .iter()
    .map(|doc| {
      serde_json::json!({
        "path": doc.path,
        "outcome": outcome_label(&doc.outcome),
        "error": match &doc.outcome {
          Outcome::Failed(err) => Some(err.to_string()),
          _ => None,
        },
      })
    })
    .collect();

  serde_json::json!({
    "dry_run": report.dry_run,
    "documents": documents,
    "updated": report.updated(),
    "unchanged": report.unchanged(),
    "skipped": report.skipped(),
    "failed": report.failed(),
  })
}

fn outcome_label(outcome: &Outcome) -> &'static str {
  match outcome {
    Outcome::Skipped => "skipped",
    Outcome::Unchanged => "unchanged",
    Outcome::Updated => "updated",
    Outcome::Failed(_) => "failed",
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
