//! File and directory copying.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::PackageError;

/// Create `path` and its parents.
pub fn create_dir(path: &Path) -> Result<(), PackageError> {
  fs::create_dir_all(path).map_err(|source| PackageError::CreateDir {
    path: path.to_path_buf(),
    source,
  })
}

/// Copy a single file, creating the destination's parent directory.
///
/// The copy keeps the source permission bits and is always owner-writable,
/// so read-only checkouts produce an editable tree.
///
/// Returns the number of bytes copied.
pub fn copy_file(from: &Path, to: &Path) -> Result<u64, PackageError> {
  if let Some(parent) = to.parent() {
    create_dir(parent)?;
  }

  let copy_err = |source: io::Error| PackageError::Copy {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  };

  let bytes = fs::copy(from, to).map_err(copy_err)?;
  make_owner_writable(to).map_err(copy_err)?;

  debug!(from = %from.display(), to = %to.display(), bytes, "copied file");
  Ok(bytes)
}

#[cfg(unix)]
fn make_owner_writable(path: &Path) -> io::Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let mut perms = fs::metadata(path)?.permissions();
  let mode = perms.mode();
  if mode & 0o200 == 0 {
    perms.set_mode(mode | 0o200);
    fs::set_permissions(path, perms)?;
  }
  Ok(())
}

#[cfg(not(unix))]
fn make_owner_writable(path: &Path) -> io::Result<()> {
  let mut perms = fs::metadata(path)?.permissions();
  if perms.readonly() {
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    fs::set_permissions(path, perms)?;
  }
  Ok(())
}

/// Copy a directory tree. Symlinks are recreated rather than followed.
///
/// Returns the files and symlinks copied, relative to `src`. A missing `src`
/// is a copy failure.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<Vec<PathBuf>, PackageError> {
  let mut copied = Vec::new();

  for entry in WalkDir::new(src).follow_links(false) {
    let entry = entry.map_err(|e| PackageError::Copy {
      from: e.path().unwrap_or(src).to_path_buf(),
      to: dst.to_path_buf(),
      source: e.into(),
    })?;

    let Ok(relative) = entry.path().strip_prefix(src) else {
      continue;
    };
    let target = dst.join(relative);
    let file_type = entry.file_type();

    if file_type.is_dir() {
      create_dir(&target)?;
    } else if file_type.is_symlink() {
      copy_symlink(entry.path(), &target)?;
      copied.push(relative.to_path_buf());
    } else {
      copy_file(entry.path(), &target)?;
      copied.push(relative.to_path_buf());
    }
  }

  debug!(src = %src.display(), dst = %dst.display(), copied = copied.len(), "copied directory");
  Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), PackageError> {
  let copy_err = |source: io::Error| PackageError::Copy {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  };

  let link_target = fs::read_link(from).map_err(copy_err)?;
  if to.symlink_metadata().is_ok() {
    fs::remove_file(to).map_err(copy_err)?;
  }
  std::os::unix::fs::symlink(&link_target, to).map_err(copy_err)
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), PackageError> {
  copy_file(from, to).map(|_| ())
}
