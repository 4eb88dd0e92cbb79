//! Configuration loading.
//!
//! A run is configured from an optional TOML file (`distpack.toml` in the
//! source directory unless a path is given) with a `[package]` table and an
//! optional `[[platforms]]` array. Missing fields fall back to defaults.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{CONFIG_FILE_NAME, DEFAULT_EXPORT_PATTERN, DEFAULT_MANIFEST_PATTERN};
use crate::platform::{PlatformDescriptor, PlatformError, PlatformTable};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },

  #[error("invalid {kind} pattern '{pattern}': {source}")]
  Pattern {
    kind: &'static str,
    pattern: String,
    source: regex::Error,
  },

  #[error(transparent)]
  Platform(#[from] PlatformError),
}

/// External header-normalization tool invoked as the last packaging step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixheadersConfig {
  /// Program path; resolved against the source directory when it exists there,
  /// otherwise looked up on `PATH`
  pub program: PathBuf,
  pub args: Vec<String>,
}

impl Default for FixheadersConfig {
  fn default() -> Self {
    Self {
      program: PathBuf::from("bin/fixheaders"),
      args: vec!["-all".to_string(), "-quiet".to_string()],
    }
  }
}

/// What to package and how to recognise it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
  /// Project manifest, relative to the source directory. Listed files are
  /// resolved relative to its parent directory.
  pub manifest: PathBuf,
  /// Directory copied recursively, relative to the source directory; an
  /// empty path disables the step
  pub examples_dir: Option<PathBuf>,
  /// Files copied verbatim to the destination root
  pub toplevel_files: Vec<PathBuf>,
  pub manifest_pattern: String,
  pub export_pattern: String,
  pub fixheaders: FixheadersConfig,
}

impl Default for PackageConfig {
  fn default() -> Self {
    Self {
      manifest: PathBuf::from("src/src.pro"),
      examples_dir: Some(PathBuf::from("examples")),
      toplevel_files: vec![PathBuf::from("LICENSE.GPL"), PathBuf::from("README")],
      manifest_pattern: DEFAULT_MANIFEST_PATTERN.to_string(),
      export_pattern: DEFAULT_EXPORT_PATTERN.to_string(),
      fixheaders: FixheadersConfig::default(),
    }
  }
}

/// Compiled manifest and export patterns.
#[derive(Debug, Clone)]
pub struct Patterns {
  pub manifest: Regex,
  pub export: Regex,
}

impl PackageConfig {
  pub fn compile_patterns(&self) -> Result<Patterns, ConfigError> {
    Ok(Patterns {
      manifest: compile("manifest", &self.manifest_pattern)?,
      export: compile("export", &self.export_pattern)?,
    })
  }
}

fn compile(kind: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
  Regex::new(pattern).map_err(|source| ConfigError::Pattern {
    kind,
    pattern: pattern.to_string(),
    source,
  })
}

/// Top-level config file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub package: PackageConfig,
  /// Replaces the builtin platform table when present
  pub platforms: Option<Vec<PlatformDescriptor>>,
}

impl Config {
  pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&content, path)
  }

  /// Load `explicit` if given, else `<source_dir>/distpack.toml` if it exists,
  /// else the defaults.
  pub fn discover(source_dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      debug!(path = %path.display(), "loading config");
      return Self::load(path);
    }

    let candidate = source_dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
      debug!(path = %candidate.display(), "loading config from source directory");
      return Self::load(&candidate);
    }

    debug!("no config file found, using defaults");
    Ok(Self::default())
  }

  /// The platform table this config describes, or the builtin one.
  pub fn platform_table(&self) -> Result<PlatformTable, ConfigError> {
    match &self.platforms {
      Some(platforms) => Ok(PlatformTable::new(platforms.clone())?),
      None => Ok(PlatformTable::builtin()),
    }
  }
}
