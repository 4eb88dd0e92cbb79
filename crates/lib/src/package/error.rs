use std::path::PathBuf;

use thiserror::Error;

use crate::consts::exit_code;

/// Failure kinds of a packaging run.
#[derive(Debug, Error)]
pub enum PackageError {
  /// The project manifest could not be read.
  #[error("cannot read manifest {}: {source}", path.display())]
  ManifestUnreadable { path: PathBuf, source: std::io::Error },

  /// The manifest was read but no line matched the manifest pattern.
  #[error("no source files found in {}", path.display())]
  NoSourceFiles { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to scan header {}: {source}", path.display())]
  ScanHeader { path: PathBuf, source: std::io::Error },

  #[error("failed to write shim header {}: {source}", path.display())]
  WriteShim { path: PathBuf, source: std::io::Error },
}

impl PackageError {
  /// Process exit code the entry point should terminate with.
  pub fn exit_code(&self) -> u8 {
    match self {
      Self::ManifestUnreadable { .. } => exit_code::MANIFEST_UNREADABLE,
      Self::NoSourceFiles { .. } => exit_code::NO_SOURCE_FILES,
      Self::CreateDir { .. } => exit_code::CREATE_DIR,
      Self::Copy { .. } | Self::ScanHeader { .. } | Self::WriteShim { .. } => exit_code::COPY,
    }
  }

  /// Whether the run had started writing the destination tree when it failed.
  pub fn touches_destination(&self) -> bool {
    !matches!(self, Self::ManifestUnreadable { .. } | Self::NoSourceFiles { .. })
  }
}
