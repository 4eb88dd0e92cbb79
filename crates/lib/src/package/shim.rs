//! Include-shim generation for exported classes.
//!
//! A shim is a file named after an exported class that includes the header
//! declaring it, so `#include <QMailAddress>` resolves to `qmailaddress.h`.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use super::PackageError;
use super::manifest::captures;
use crate::consts::PRIVATE_HEADER_SUFFIX;

pub fn is_header(name: &str) -> bool {
  name.ends_with(".h")
}

pub fn is_private_header(name: &str) -> bool {
  name.ends_with(PRIVATE_HEADER_SUFFIX)
}

/// Whether a manifest entry should be scanned for exported classes.
pub fn is_public_header(name: &str) -> bool {
  is_header(name) && !is_private_header(name)
}

/// Class names declared by `content`, scanned one line at a time, in order.
pub fn exported_classes(content: &str, pattern: &Regex) -> Vec<String> {
  let mut classes: Vec<String> = Vec::new();
  for line in content.lines() {
    for class in captures(pattern, line) {
      if !classes.iter().any(|c| c == class) {
        classes.push(class.to_string());
      }
    }
  }
  classes
}

/// The single line written into a shim for `header_name`.
pub fn shim_contents(header_name: &str) -> String {
  format!("#include \"{header_name}\"\n")
}

/// Scan `header` and write one shim per exported class next to it.
///
/// Returns the paths of the shims written.
pub fn write_shims(header: &Path, pattern: &Regex) -> Result<Vec<PathBuf>, PackageError> {
  let bytes = fs::read(header).map_err(|source| PackageError::ScanHeader {
    path: header.to_path_buf(),
    source,
  })?;
  let content = String::from_utf8_lossy(&bytes);

  let Some(header_name) = header.file_name().map(|n| n.to_string_lossy().into_owned()) else {
    return Ok(Vec::new());
  };
  let dir = header.parent().unwrap_or_else(|| Path::new(""));
  let contents = shim_contents(&header_name);

  let mut written = Vec::new();
  for class in exported_classes(&content, pattern) {
    let shim = dir.join(&class);
    fs::write(&shim, &contents).map_err(|source| PackageError::WriteShim {
      path: shim.clone(),
      source,
    })?;
    debug!(shim = %shim.display(), header = %header_name, "wrote shim header");
    written.push(shim);
  }

  Ok(written)
}
