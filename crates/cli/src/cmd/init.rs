//! Implementation of the `manisync init` command.
//!
//! Scaffolds a starter plan file showing the record shape, refusing to
//! overwrite one that already exists.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::output::print_success;

/// Starter plan written by `manisync init`.
const STARTER_PLAN: &str = r#"{
  "name_style": "plain",
  "documents": {
    "apps/app-utl-001-example.xml": {
      "reference_id": "APP-UTL-001",
      "version": "1.0",
      "name": "Example Package",
      "source_file": "apps/app-utl-001-example.pkg"
    }
  }
}
"#;

pub fn cmd_init(dir: &Path) -> Result<()> {
  fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

  let plan_path = dir.join("plan.json");
  if plan_path.exists() {
    bail!("plan file already exists: {}", plan_path.display());
  }

  fs::write(&plan_path, STARTER_PLAN)
    .with_context(|| format!("failed to write {}", plan_path.display()))?;

  print_success(&format!("Created {}", plan_path.display()));
  println!();
  println!("Edit the plan, then preview and apply it:");
  println!();
  println!("  manisync plan {}", plan_path.display());
  println!("  manisync apply {}", plan_path.display());

  Ok(())
}
