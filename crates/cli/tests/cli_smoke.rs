//! CLI smoke tests for manisync.
//!
//! These tests verify that all CLI commands run without panicking and
//! return appropriate exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the manisync binary.
fn manisync_cmd() -> Command {
  cargo_bin_cmd!("manisync")
}

/// Create a temp directory holding a plan file and return it.
fn temp_plan(plan: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("plan.json"), plan).unwrap();
  temp
}

fn write_doc(temp: &TempDir, rel: &str, content: &str) {
  let path = temp.path().join(rel);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
}

/// Plan with one document that needs a name rewrite.
const RENAME_PLAN: &str = r#"{
  "documents": {
    "app.xml": { "name": "New Name" }
  }
}
"#;

/// Plan whose document path never exists.
const MISSING_DOC_PLAN: &str = r#"{
  "documents": {
    "absent/missing.xml": { "name": "Whatever" }
  }
}
"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  manisync_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  manisync_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("manisync"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["apply", "plan", "init"] {
    manisync_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_creates_plan_file() {
  let temp = TempDir::new().unwrap();
  let dir = temp.path().join("myplans");

  manisync_cmd().arg("init").arg(&dir).assert().success();

  assert!(dir.join("plan.json").exists());
}

#[test]
fn init_fails_if_plan_exists() {
  let temp = temp_plan(RENAME_PLAN);

  manisync_cmd()
    .arg("init")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));
}

// =============================================================================
// plan (dry-run)
// =============================================================================

#[test]
fn plan_reports_pending_change_without_writing() {
  let temp = temp_plan(RENAME_PLAN);
  let original = "<Manifest>\n  <Name>Old Name</Name>\n</Manifest>";
  write_doc(&temp, "app.xml", original);

  manisync_cmd()
    .arg("plan")
    .arg(temp.path().join("plan.json"))
    .arg("--root")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("would update"));

  let on_disk = std::fs::read_to_string(temp.path().join("app.xml")).unwrap();
  assert_eq!(on_disk, original);
}

#[test]
fn plan_with_satisfied_documents_reports_no_changes() {
  let temp = temp_plan(RENAME_PLAN);
  write_doc(&temp, "app.xml", "<Manifest>\n  <Name>New Name</Name>\n</Manifest>");

  manisync_cmd()
    .arg("plan")
    .arg(temp.path().join("plan.json"))
    .arg("--root")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("No changes would be made"));
}

#[test]
fn plan_nonexistent_plan_file_fails() {
  let temp = TempDir::new().unwrap();

  manisync_cmd()
    .arg("plan")
    .arg(temp.path().join("nope.json"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to load plan"));
}

// =============================================================================
// apply
// =============================================================================

#[test]
fn apply_rewrites_drifted_document() {
  let temp = temp_plan(RENAME_PLAN);
  write_doc(&temp, "app.xml", "<Manifest>\n  <Name>Old Name</Name>\n</Manifest>");

  manisync_cmd()
    .arg("apply")
    .arg(temp.path().join("plan.json"))
    .arg("--root")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Apply complete"));

  let on_disk = std::fs::read_to_string(temp.path().join("app.xml")).unwrap();
  assert!(on_disk.contains("<Name>New Name</Name>"));
}

#[test]
fn apply_is_idempotent() {
  let temp = temp_plan(RENAME_PLAN);
  write_doc(&temp, "app.xml", "<Manifest>\n  <Name>Old Name</Name>\n</Manifest>");

  let plan_path = temp.path().join("plan.json");
  manisync_cmd()
    .arg("apply")
    .arg(&plan_path)
    .arg("--root")
    .arg(temp.path())
    .assert()
    .success();

  manisync_cmd()
    .arg("apply")
    .arg(&plan_path)
    .arg("--root")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("(unchanged)"));
}

#[test]
fn apply_skips_missing_documents() {
  let temp = temp_plan(MISSING_DOC_PLAN);

  manisync_cmd()
    .arg("apply")
    .arg(temp.path().join("plan.json"))
    .arg("--root")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("skipped"));
}

#[test]
fn apply_malformed_document_fails_but_finishes_the_batch() {
  let plan = r#"{
  "documents": {
    "bad.xml": { "name": "A" },
    "good.xml": { "name": "B" }
  }
}
"#;
  let temp = temp_plan(plan);
  write_doc(&temp, "bad.xml", "no markup here");
  write_doc(&temp, "good.xml", "<Manifest>\n  <Name>Old</Name>\n</Manifest>");

  manisync_cmd()
    .arg("apply")
    .arg(temp.path().join("plan.json"))
    .arg("--root")
    .arg(temp.path())
    .assert()
    .failure()
    .stdout(predicate::str::contains("failed"));

  // The failure did not stop the other document from being updated.
  let on_disk = std::fs::read_to_string(temp.path().join("good.xml")).unwrap();
  assert!(on_disk.contains("<Name>B</Name>"));
}

#[test]
fn apply_nonexistent_plan_file_fails() {
  let temp = TempDir::new().unwrap();

  manisync_cmd()
    .arg("apply")
    .arg(temp.path().join("nope.json"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to load plan"));
}

// =============================================================================
// JSON output
// =============================================================================

#[test]
fn apply_json_output_carries_counts() {
  let temp = temp_plan(RENAME_PLAN);
  write_doc(&temp, "app.xml", "<Manifest>\n  <Name>Old Name</Name>\n</Manifest>");

  manisync_cmd()
    .arg("apply")
    .arg(temp.path().join("plan.json"))
    .arg("--root")
    .arg(temp.path())
    .arg("--json")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"updated\": 1"));
}
