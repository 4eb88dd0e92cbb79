//! Invocation of the external header-normalization tool.
//!
//! The tool's result never fails a packaging run: a missing program or a
//! non-zero exit is reported in [`FixheadersOutcome`] and logged.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::FixheadersConfig;

/// What happened when the tool was (or was not) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixheadersOutcome {
  Skipped,
  Succeeded,
  Failed { code: Option<i32> },
  NotFound { program: PathBuf },
}

/// Use the program from the source tree when it exists there, otherwise leave
/// it to `PATH` lookup.
pub fn resolve_program(source_dir: &Path, program: &Path) -> PathBuf {
  let in_tree = source_dir.join(program);
  if in_tree.is_file() {
    dunce::canonicalize(&in_tree).unwrap_or(in_tree)
  } else {
    program.to_path_buf()
  }
}

/// Run the tool with its configured flags, working in `dest_dir`.
pub fn run_fixheaders(source_dir: &Path, dest_dir: &Path, config: &FixheadersConfig) -> FixheadersOutcome {
  let program = resolve_program(source_dir, &config.program);
  info!(program = %program.display(), args = ?config.args, "running fixheaders");

  let output = match Command::new(&program).args(&config.args).current_dir(dest_dir).output() {
    Ok(output) => output,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      warn!(program = %program.display(), "fixheaders not found, headers left as copied");
      return FixheadersOutcome::NotFound { program };
    }
    Err(e) => {
      warn!(program = %program.display(), error = %e, "failed to start fixheaders");
      return FixheadersOutcome::Failed { code: None };
    }
  };

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stdout.is_empty() {
    debug!(stdout = %stdout.trim_end(), "fixheaders stdout");
  }
  if !stderr.is_empty() {
    debug!(stderr = %stderr.trim_end(), "fixheaders stderr");
  }

  if output.status.success() {
    FixheadersOutcome::Succeeded
  } else {
    warn!(code = ?output.status.code(), "fixheaders exited with failure");
    FixheadersOutcome::Failed {
      code: output.status.code(),
    }
  }
}
