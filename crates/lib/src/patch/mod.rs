//! Field patch engine.
//!
//! Takes a manifest document as raw text plus the desired field assignments
//! and produces the updated text along with a changed flag. The engine is
//! stateless and purely textual: it anchors on element tags rather than
//! parsing the document into a tree.
//!
//! # Behavior
//!
//! Each assignment is applied against the current text, in order:
//! - an existing element span is rewritten in place; a byte-identical
//!   rewrite does not count as a change
//! - a missing root-level field is inserted just after the root opening
//!   tag, kept in declaration order relative to its siblings so output is
//!   the same no matter what order assignments arrive in
//! - a missing package-level field is inserted just before `</Package>`
//!
//! Re-running the engine over its own output is always a no-op.

mod types;

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

pub use types::{FieldAssignment, FieldName, PatchError, PatchResult, Placement};

/// Apply every assignment to the document.
///
/// Returns the new text and whether any assignment changed it. Assignments
/// are applied independently; each one sees the text produced by the
/// previous one, never positions computed against the original document.
pub fn patch(document: &str, assignments: &[FieldAssignment]) -> Result<PatchResult, PatchError> {
  let mut text = document.to_string();
  let mut changed = false;

  for assignment in assignments {
    changed |= apply_assignment(&mut text, assignment)?;
  }

  Ok(PatchResult { text, changed })
}

fn apply_assignment(text: &mut String, assignment: &FieldAssignment) -> Result<bool, PatchError> {
  let rendered = assignment.rendered();

  if let Some(span) = element_span(text, assignment.field)? {
    if &text[span.clone()] == rendered.as_str() {
      return Ok(false);
    }
    text.replace_range(span, &rendered);
    return Ok(true);
  }

  let (at, insertion) = match assignment.field.placement() {
    Placement::Root => root_insertion(text, assignment.field, &rendered)?,
    Placement::Package => package_insertion(text, assignment.field, &rendered)?,
  };
  text.insert_str(at, &insertion);
  Ok(true)
}

/// The span of an existing `<Tag>...</Tag>` element, if the document has
/// exactly one.
///
/// Matching is anchored on the exact element name, so `ReferenceId` never
/// matches a `ReferenceId2` element. More than one occurrence, or an
/// opening tag without its closing tag, is a malformed document.
fn element_span(text: &str, field: FieldName) -> Result<Option<Range<usize>>, PatchError> {
  let mut matches = span_pattern(field).find_iter(text);
  let first = matches.next();
  if matches.next().is_some() {
    return Err(PatchError::DuplicateField(field));
  }

  let opens = text.matches(&format!("<{}>", field.tag())).count();
  match first {
    Some(m) if opens == 1 => Ok(Some(m.range())),
    Some(_) => Err(PatchError::UnclosedField(field)),
    None if opens > 0 => Err(PatchError::UnclosedField(field)),
    None => Ok(None),
  }
}

/// Compiled `<Tag>...</Tag>` span patterns, one per known field.
fn span_pattern(field: FieldName) -> &'static Regex {
  static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FieldName::ALL
      .iter()
      .map(|f| {
        Regex::new(&format!("(?s)<{0}>.*?</{0}>", f.tag())).expect("field span patterns are static")
      })
      .collect()
  });
  &PATTERNS[field as usize]
}

/// Insertion point and text for a missing root-level field.
///
/// Anchors on the closest declared sibling that is already present, falling
/// back to just after the root opening tag, so identity fields end up ahead
/// of descriptive fields regardless of assignment order.
fn root_insertion(text: &str, field: FieldName, rendered: &str) -> Result<(usize, String), PatchError> {
  let order = &FieldName::ROOT_ORDER;
  let idx = order.iter().position(|&f| f == field).unwrap_or(order.len());

  for &earlier in order[..idx].iter().rev() {
    if let Some(span) = element_span(text, earlier)? {
      let indent = line_indent(text, span.start);
      return Ok((span.end, format!("\n{indent}{rendered}")));
    }
  }

  let root = root_open_span(text)?;
  let indent = format!("{}  ", line_indent(text, root.start));
  Ok((root.end, format!("\n{indent}{rendered}")))
}

/// Insertion point and text for a missing package-level field.
///
/// Inserts just before `</Package>`. When `PostInstallScript` is already
/// present, `PreInstallScript` goes in front of it instead, keeping the
/// scripts in declaration order.
fn package_insertion(text: &str, field: FieldName, rendered: &str) -> Result<(usize, String), PatchError> {
  let close_at = match text.find("</Package>") {
    Some(at) if text[..at].contains("<Package>") => at,
    _ => return Err(PatchError::MissingPackage(field)),
  };

  if field == FieldName::PreInstallScript {
    if let Some(span) = element_span(text, FieldName::PostInstallScript)? {
      if span.start < close_at {
        let indent = line_indent(text, span.start);
        return Ok((span.start, format!("{rendered}\n{indent}")));
      }
    }
  }

  let indent = line_indent(text, close_at);
  Ok((close_at, format!("  {rendered}\n{indent}")))
}

static ROOT_OPEN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^<[A-Za-z][A-Za-z0-9._-]*(\s[^<>]*)?>").expect("root open pattern is static")
});

/// The span of the document's root opening tag.
///
/// Skips the XML declaration, comments, and doctype. Fails when the first
/// piece of markup after those is not an ordinary opening tag.
fn root_open_span(text: &str) -> Result<Range<usize>, PatchError> {
  let mut offset = 0;

  loop {
    let rest = &text[offset..];
    let trimmed = rest.trim_start();
    offset += rest.len() - trimmed.len();

    match leading_prolog_len(trimmed) {
      Some(len) => offset += len,
      None => break,
    }
  }

  match ROOT_OPEN.find(&text[offset..]) {
    Some(m) => Ok(offset..offset + m.end()),
    None => Err(PatchError::MissingRoot),
  }
}

/// Length of a leading prolog item (declaration, comment, doctype), if any.
fn leading_prolog_len(text: &str) -> Option<usize> {
  if text.starts_with("<?") {
    text.find("?>").map(|i| i + 2)
  } else if text.starts_with("<!--") {
    text.find("-->").map(|i| i + 3)
  } else if text.starts_with("<!") {
    text.find('>').map(|i| i + 1)
  } else {
    None
  }
}

/// Leading whitespace of the line containing byte offset `at`.
fn line_indent(text: &str, at: usize) -> &str {
  let line_start = text[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
  let line = &text[line_start..at];
  let trimmed = line.trim_start();
  &line[..line.len() - trimmed.len()]
}
