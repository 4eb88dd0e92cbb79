//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const PROJECT_PRO: &str = "\
TEMPLATE = lib
TARGET = mail

HEADERS += mailaddress.h \\
           mailfolder.h \\
           mailaddress_p.h

SOURCES += mailaddress.cpp \\
           mailfolder.cpp
";

pub const MAILADDRESS_H: &str = "\
#ifndef MAILADDRESS_H
#define MAILADDRESS_H

class MailAddressPrivate;

class MAIL_EXPORT MailAddress
{
public:
    MailAddress();
};

class MAIL_EXPORT MailAddressList
{
};

#endif
";

pub const MAILFOLDER_H: &str = "class MAIL_EXPORT MailFolder {};\n";

pub const MAILADDRESS_P_H: &str = "class MAIL_EXPORT MailAddressPrivate {};\n";

/// Isolated test environment.
///
/// Each test gets its own temporary directory with a source project and a
/// destination path that does not exist yet.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A complete source project: manifest, headers, sources, examples and
  /// toplevel files.
  pub fn project() -> Self {
    let env = Self::empty();
    env.write_file("src/src.pro", PROJECT_PRO);
    env.write_file("src/mailaddress.h", MAILADDRESS_H);
    env.write_file("src/mailfolder.h", MAILFOLDER_H);
    env.write_file("src/mailaddress_p.h", MAILADDRESS_P_H);
    env.write_file("src/mailaddress.cpp", "#include \"mailaddress.h\"\n");
    env.write_file("src/mailfolder.cpp", "#include \"mailfolder.h\"\n");
    env.write_file("examples/reader/main.cpp", "int main() { return 0; }\n");
    env.write_file("examples/reader/reader.pro", "SOURCES = main.cpp\n");
    env.write_file("LICENSE.GPL", "GPL\n");
    env.write_file("README", "Standalone mail library\n");
    env
  }

  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the source directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.source_path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Write an executable shell script relative to the source directory.
  #[cfg(unix)]
  pub fn write_script(&self, relative_path: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    self.write_file(relative_path, &format!("#!/bin/sh\n{body}\n"));
    let path = self.source_path().join(relative_path);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  pub fn remove_file(&self, relative_path: &str) {
    std::fs::remove_file(self.source_path().join(relative_path)).unwrap();
  }

  pub fn source_path(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  pub fn dest_path(&self) -> PathBuf {
    self.temp.path().join("dist")
  }

  pub fn dest_file(&self, relative_path: &str) -> PathBuf {
    self.dest_path().join(relative_path)
  }

  /// A distpack command packaging this environment's source into its destination.
  pub fn package_cmd(&self) -> Command {
    self.package_cmd_to(&self.dest_path())
  }

  /// A distpack command packaging this environment's source into `dest`.
  pub fn package_cmd_to(&self, dest: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("distpack");
    cmd
      .current_dir(self.temp.path())
      .env_remove("RUST_LOG")
      .arg("-s")
      .arg(self.source_path())
      .arg("-o")
      .arg(dest);
    cmd
  }
}

/// Read a file to a string, panicking with its path on failure.
pub fn read(path: &Path) -> String {
  std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}
