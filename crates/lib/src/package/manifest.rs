//! Manifest scanning.

use std::collections::HashSet;
use std::path::{Component, Path};

use regex::Regex;
use tracing::{debug, warn};

use super::PackageError;

/// Every match of `pattern` in `text`: capture group 1 when the pattern has
/// one, otherwise the whole match.
pub fn captures<'t>(pattern: &Regex, text: &'t str) -> impl Iterator<Item = &'t str> {
  pattern
    .captures_iter(text)
    .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
    .map(|m| m.as_str())
}

/// Collect the filenames listed in a manifest, line by line, in first-seen order.
///
/// A file listed twice is returned once. Entries that are absolute or climb out
/// of the manifest directory are skipped.
pub fn parse_manifest(content: &str, pattern: &Regex) -> Vec<String> {
  let mut seen = HashSet::new();
  let mut entries = Vec::new();

  for line in content.lines() {
    for entry in captures(pattern, line) {
      if !is_contained(entry) {
        warn!(entry, "skipping manifest entry outside the manifest directory");
        continue;
      }
      if seen.insert(entry) {
        entries.push(entry.to_string());
      }
    }
  }

  entries
}

fn is_contained(entry: &str) -> bool {
  let path = Path::new(entry);
  !entry.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Read a manifest file and extract its source file list.
///
/// # Errors
///
/// - [`PackageError::ManifestUnreadable`] if the file cannot be read
/// - [`PackageError::NoSourceFiles`] if nothing matched
pub fn read_manifest(path: &Path, pattern: &Regex) -> Result<Vec<String>, PackageError> {
  let bytes = std::fs::read(path).map_err(|source| PackageError::ManifestUnreadable {
    path: path.to_path_buf(),
    source,
  })?;

  // Filenames are ASCII; stray Latin-1 bytes in comments must not fail the scan.
  let entries = parse_manifest(&String::from_utf8_lossy(&bytes), pattern);
  if entries.is_empty() {
    return Err(PackageError::NoSourceFiles {
      path: path.to_path_buf(),
    });
  }

  debug!(path = %path.display(), count = entries.len(), "parsed manifest");
  Ok(entries)
}
