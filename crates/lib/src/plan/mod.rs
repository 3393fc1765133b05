//! Update plans: which documents to touch and what metadata they must carry.
//!
//! A plan is an externally loaded JSON record, replacing the hardcoded
//! path-to-metadata tables this tool grew out of. Documents are keyed by
//! path relative to the root directory the driver resolves against.
//!
//! ```json
//! {
//!   "name_style": "with_reference_id",
//!   "documents": {
//!     "apps/app-utl-002-dialog-onboarding.xml": {
//!       "reference_id": "APP-UTL-002",
//!       "name": "Swift Dialog Onboarding",
//!       "source_file": "apps/app-utl-002-dialog-onboarding.pkg"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::patch::{FieldAssignment, FieldName};

/// How the enforced display name is composed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
  /// Use the record's name verbatim.
  #[default]
  Plain,
  /// Prefix the name with the reference id: `REF-ID - Name`.
  WithReferenceId,
}

/// Desired metadata for a single manifest document.
///
/// Every field is optional: only fields present in the record are enforced
/// on the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reference_id: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,

  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_file: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pre_install_script: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub post_install_script: Option<String>,
}

impl DocumentRecord {
  /// Expand the record into declaration-ordered field assignments.
  ///
  /// Order matters for fields being newly inserted; existing fields are
  /// rewritten in place wherever they already sit.
  pub fn assignments(&self, style: NameStyle) -> Vec<FieldAssignment> {
    let mut out = Vec::new();

    if let Some(value) = &self.reference_id {
      out.push(FieldAssignment::new(FieldName::ReferenceId, value.clone()));
    }
    if let Some(value) = &self.version {
      out.push(FieldAssignment::new(FieldName::Version, value.clone()));
    }
    if let Some(value) = &self.kind {
      out.push(FieldAssignment::new(FieldName::Type, value.clone()));
    }
    if let Some(name) = &self.name {
      out.push(FieldAssignment::new(FieldName::Name, self.display_name(name, style)));
    }
    if let Some(value) = &self.source_file {
      out.push(FieldAssignment::new(FieldName::SourceFile, value.clone()));
    }
    if let Some(value) = &self.pre_install_script {
      out.push(FieldAssignment::new(FieldName::PreInstallScript, value.clone()));
    }
    if let Some(value) = &self.post_install_script {
      out.push(FieldAssignment::new(FieldName::PostInstallScript, value.clone()));
    }

    out
  }

  fn display_name(&self, name: &str, style: NameStyle) -> String {
    match (style, &self.reference_id) {
      (NameStyle::WithReferenceId, Some(reference)) => format!("{reference} - {name}"),
      _ => name.to_string(),
    }
  }
}

/// Errors loading a plan file.
#[derive(Debug, Error)]
pub enum PlanError {
  /// The plan file does not exist.
  #[error("plan file not found: {}", .0.display())]
  NotFound(PathBuf),

  /// The plan file could not be read.
  #[error("failed to read plan: {0}")]
  Read(#[source] io::Error),

  /// The plan file is not valid JSON or has the wrong shape.
  #[error("failed to parse plan: {0}")]
  Parse(#[from] serde_json::Error),
}

/// The full update plan: relative document path to desired record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlan {
  /// Display-name composition policy for every record in the plan.
  #[serde(default)]
  pub name_style: NameStyle,

  /// Documents to synchronize, keyed by path relative to the root
  /// directory. `BTreeMap` keeps iteration order deterministic.
  #[serde(default)]
  pub documents: BTreeMap<String, DocumentRecord>,
}

impl UpdatePlan {
  /// Load a plan from a JSON file.
  pub fn load(path: &Path) -> Result<Self, PlanError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(PlanError::NotFound(path.to_path_buf()));
      }
      Err(e) => return Err(PlanError::Read(e)),
    };

    Ok(serde_json::from_str(&content)?)
  }

  pub fn len(&self) -> usize {
    self.documents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }
}
