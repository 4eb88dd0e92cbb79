//! Cross-compilation platform table.
//!
//! The table is loaded once at startup, either from the builtin list or from a
//! `[[platforms]]` array in a TOML file, and is read-only afterwards. Consumers
//! receive it by reference; there is no process-wide registry.

pub mod arch;
mod builtin;
pub mod os;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use arch::Arch;
pub use os::HostOs;

/// Errors that can occur while building a platform table.
#[derive(Debug, Error)]
pub enum PlatformError {
  #[error("unknown operating system tag: {0}")]
  UnknownOs(String),

  #[error("unknown architecture tag: {0}")]
  UnknownArch(String),

  #[error("duplicate platform id: {0}")]
  DuplicateId(String),

  #[error("failed to parse platform table: {0}")]
  Parse(#[from] toml::de::Error),
}

/// A cross-compilation target: OS, architecture, distribution and the family
/// tags used for build-configuration matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
  pub id: String,
  pub host_os: HostOs,
  pub arch: Arch,
  pub distro: String,
  /// Ordered family tags, most specific last
  #[serde(default)]
  pub families: Vec<String>,
}

impl PlatformDescriptor {
  pub fn new(id: impl Into<String>, host_os: HostOs, arch: Arch, distro: impl Into<String>, families: &[&str]) -> Self {
    Self {
      id: id.into(),
      host_os,
      arch,
      distro: distro.into(),
      families: families.iter().map(|f| f.to_string()).collect(),
    }
  }

  /// Whether `tag` is one of this platform's family tags
  pub fn has_family(&self, tag: &str) -> bool {
    self.families.iter().any(|f| f == tag)
  }
}

impl fmt::Display for PlatformDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({}-{}, {})", self.id, self.arch, self.host_os, self.distro)
  }
}

#[derive(Deserialize)]
struct PlatformFile {
  #[serde(default)]
  platforms: Vec<PlatformDescriptor>,
}

/// Ordered, read-only collection of platform descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlatformTable {
  platforms: Vec<PlatformDescriptor>,
}

impl PlatformTable {
  /// Build a table, rejecting duplicate ids.
  pub fn new(platforms: Vec<PlatformDescriptor>) -> Result<Self, PlatformError> {
    let mut seen = HashSet::new();
    for platform in &platforms {
      if !seen.insert(platform.id.as_str()) {
        return Err(PlatformError::DuplicateId(platform.id.clone()));
      }
    }
    Ok(Self { platforms })
  }

  /// The statically listed platforms, in declaration order.
  pub fn builtin() -> Self {
    Self {
      platforms: builtin::platforms(),
    }
  }

  /// Parse a `[[platforms]]` array from TOML text.
  pub fn from_toml_str(content: &str) -> Result<Self, PlatformError> {
    let file: PlatformFile = toml::from_str(content)?;
    Self::new(file.platforms)
  }

  pub fn get(&self, id: &str) -> Option<&PlatformDescriptor> {
    self.platforms.iter().find(|p| p.id == id)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, PlatformDescriptor> {
    self.platforms.iter()
  }

  /// Platforms carrying the given family tag, in table order.
  pub fn with_family<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a PlatformDescriptor> + 'a {
    self.platforms.iter().filter(move |p| p.has_family(tag))
  }

  pub fn len(&self) -> usize {
    self.platforms.len()
  }

  pub fn is_empty(&self) -> bool {
    self.platforms.is_empty()
  }
}

impl<'a> IntoIterator for &'a PlatformTable {
  type Item = &'a PlatformDescriptor;
  type IntoIter = std::slice::Iter<'a, PlatformDescriptor>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
