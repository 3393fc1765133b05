//! Types for the field patch engine.
//!
//! A [`FieldAssignment`] pairs a known [`FieldName`] with the string value
//! the document must carry for it. [`PatchError`] covers the structural
//! problems that make a document unpatchable; all of them are fatal to the
//! affected document only.

use std::fmt;

use thiserror::Error;

/// Where a field lives inside a manifest document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
  /// Directly under the document's root element.
  Root,
  /// Inside the `<Package>` sub-block.
  Package,
}

/// A metadata field the engine knows how to enforce.
///
/// Declaration order here is the order fields are inserted in when they are
/// missing from a document: identity fields (`ReferenceId`, `Version`)
/// precede descriptive fields, and the package script fields come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
  ReferenceId,
  Version,
  Type,
  Name,
  SourceFile,
  PreInstallScript,
  PostInstallScript,
}

impl FieldName {
  /// Every known field, in declaration order.
  pub const ALL: [FieldName; 7] = [
    FieldName::ReferenceId,
    FieldName::Version,
    FieldName::Type,
    FieldName::Name,
    FieldName::SourceFile,
    FieldName::PreInstallScript,
    FieldName::PostInstallScript,
  ];

  /// Root-level fields in declaration order.
  pub const ROOT_ORDER: [FieldName; 5] = [
    FieldName::ReferenceId,
    FieldName::Version,
    FieldName::Type,
    FieldName::Name,
    FieldName::SourceFile,
  ];

  /// The element name as it appears in the document.
  pub fn tag(self) -> &'static str {
    match self {
      FieldName::ReferenceId => "ReferenceId",
      FieldName::Version => "Version",
      FieldName::Type => "Type",
      FieldName::Name => "Name",
      FieldName::SourceFile => "SourceFile",
      FieldName::PreInstallScript => "PreInstallScript",
      FieldName::PostInstallScript => "PostInstallScript",
    }
  }

  /// Where this field belongs when it has to be inserted.
  pub fn placement(self) -> Placement {
    match self {
      FieldName::PreInstallScript | FieldName::PostInstallScript => Placement::Package,
      _ => Placement::Root,
    }
  }
}

impl fmt::Display for FieldName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

/// A single desired field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
  pub field: FieldName,
  pub value: String,
}

impl FieldAssignment {
  pub fn new(field: FieldName, value: impl Into<String>) -> Self {
    Self {
      field,
      value: value.into(),
    }
  }

  /// The full element text this assignment should produce.
  pub(crate) fn rendered(&self) -> String {
    format!("<{tag}>{value}</{tag}>", tag = self.field.tag(), value = self.value)
  }
}

/// Result of patching one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
  /// The document text after all assignments were applied.
  pub text: String,
  /// Whether any assignment modified the text.
  pub changed: bool,
}

/// Structural problems that make a document unpatchable.
#[derive(Debug, Error)]
pub enum PatchError {
  /// The document has no recognizable root opening tag.
  #[error("no root element found")]
  MissingRoot,

  /// A script field was requested but the document has no `<Package>` block.
  #[error("no <Package> block to hold <{0}>")]
  MissingPackage(FieldName),

  /// The document contains more than one element with the same field name.
  #[error("duplicate <{0}> elements")]
  DuplicateField(FieldName),

  /// An opening tag has no matching closing tag.
  #[error("unclosed <{0}> element")]
  UnclosedField(FieldName),
}
