//! Standalone source packaging.
//!
//! A run reads the project manifest, copies the examples directory, the
//! toplevel files, the manifest and every file it lists into the destination,
//! writes include shims for exported classes, and finally runs `fixheaders`
//! over the result.

pub mod copy;
mod error;
pub mod fixheaders;
pub mod manifest;
pub mod shim;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{ConfigError, PackageConfig, Patterns};

pub use error::PackageError;
pub use fixheaders::FixheadersOutcome;

/// Inputs of a single packaging run.
#[derive(Debug, Clone)]
pub struct PackageOptions {
  pub source_dir: PathBuf,
  pub dest_dir: PathBuf,
  pub skip_fixheaders: bool,
  pub config: PackageConfig,
  patterns: Patterns,
}

impl PackageOptions {
  /// Compiles the configured patterns up front so a bad pattern fails before
  /// anything touches the filesystem.
  pub fn new(source_dir: PathBuf, dest_dir: PathBuf, config: PackageConfig) -> Result<Self, ConfigError> {
    let patterns = config.compile_patterns()?;
    Ok(Self {
      source_dir,
      dest_dir,
      skip_fixheaders: false,
      config,
      patterns,
    })
  }

  pub fn skip_fixheaders(mut self, skip: bool) -> Self {
    self.skip_fixheaders = skip;
    self
  }
}

/// What a successful run produced. Paths are relative to the destination.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
  pub source_dir: PathBuf,
  pub dest_dir: PathBuf,
  /// Filenames extracted from the manifest, in manifest order
  pub manifest_entries: Vec<String>,
  /// The manifest followed by every listed file
  pub sources: Vec<PathBuf>,
  pub toplevel: Vec<PathBuf>,
  pub examples: Vec<PathBuf>,
  pub shims: Vec<PathBuf>,
  pub fixheaders: FixheadersOutcome,
}

impl PackageReport {
  /// Number of files copied from the manifest, including the manifest itself
  pub fn files_copied(&self) -> usize {
    self.sources.len()
  }
}

/// Build the standalone tree described by `options`.
///
/// Nothing is written when the manifest is unreadable or lists no files. On
/// any later failure the destination tree is removed, provided this run
/// created it.
pub fn package(options: &PackageOptions) -> Result<PackageReport, PackageError> {
  let source_dir = dunce::canonicalize(&options.source_dir).unwrap_or_else(|_| options.source_dir.clone());
  let dest_dir = &options.dest_dir;

  info!(source = %source_dir.display(), dest = %dest_dir.display(), "packaging");

  let manifest_path = source_dir.join(&options.config.manifest);
  let entries = manifest::read_manifest(&manifest_path, &options.patterns.manifest)?;
  info!(count = entries.len(), manifest = %manifest_path.display(), "located source files");

  let created_dest = !dest_dir.exists();
  match build_tree(options, &source_dir, entries) {
    Ok(report) => Ok(report),
    Err(e) => {
      remove_partial_tree(dest_dir, created_dest);
      Err(e)
    }
  }
}

fn build_tree(options: &PackageOptions, source_dir: &Path, entries: Vec<String>) -> Result<PackageReport, PackageError> {
  let config = &options.config;
  let dest_dir = &options.dest_dir;

  let manifest_rel = config.manifest.as_path();
  let source_rel = manifest_rel.parent().unwrap_or_else(|| Path::new(""));
  let dest_sources = dest_dir.join(source_rel);

  copy::create_dir(dest_dir)?;
  copy::create_dir(&dest_sources)?;

  let examples: Vec<PathBuf> = match &config.examples_dir {
    Some(examples) if !examples.as_os_str().is_empty() => {
      let copied = copy::copy_dir_recursive(&source_dir.join(examples), &dest_dir.join(examples))?;
      info!(copied = copied.len(), dir = %examples.display(), "copied examples");
      copied.into_iter().map(|path| examples.join(path)).collect()
    }
    _ => Vec::new(),
  };

  let mut toplevel = Vec::with_capacity(config.toplevel_files.len());
  for file in &config.toplevel_files {
    copy::copy_file(&source_dir.join(file), &dest_dir.join(file))?;
    toplevel.push(file.clone());
  }
  info!(copied = toplevel.len(), "copied toplevel files");

  let mut sources = Vec::with_capacity(entries.len() + 1);
  copy::copy_file(&source_dir.join(manifest_rel), &dest_dir.join(manifest_rel))?;
  sources.push(manifest_rel.to_path_buf());

  let mut shims = Vec::new();
  for entry in &entries {
    let from = source_dir.join(source_rel).join(entry);
    let to = dest_sources.join(entry);
    copy::copy_file(&from, &to)?;
    sources.push(source_rel.join(entry));

    if shim::is_public_header(entry) {
      for written in shim::write_shims(&to, &options.patterns.export)? {
        shims.push(relative_to(dest_dir, &written));
      }
    }
  }
  info!(copied = sources.len(), shims = shims.len(), "copied sources");

  let fixheaders = if options.skip_fixheaders {
    FixheadersOutcome::Skipped
  } else {
    fixheaders::run_fixheaders(source_dir, dest_dir, &config.fixheaders)
  };

  Ok(PackageReport {
    source_dir: source_dir.to_path_buf(),
    dest_dir: dest_dir.clone(),
    manifest_entries: entries,
    sources,
    toplevel,
    examples,
    shims,
    fixheaders,
  })
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
  path.strip_prefix(base).unwrap_or(path).to_path_buf()
}

fn remove_partial_tree(dest_dir: &Path, created_by_run: bool) {
  if !created_by_run {
    warn!(dest = %dest_dir.display(), "destination existed before this run, leaving it in place");
    return;
  }
  if let Err(e) = fs::remove_dir_all(dest_dir) {
    if e.kind() != std::io::ErrorKind::NotFound {
      warn!(dest = %dest_dir.display(), error = %e, "failed to remove partial destination");
    }
  } else {
    info!(dest = %dest_dir.display(), "removed partial destination");
  }
}
