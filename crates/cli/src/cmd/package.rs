//! Package command implementation.
//!
//! Loads configuration, applies pattern overrides from the command line and
//! builds the standalone tree.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::debug;

use distpack_lib::{Config, FixheadersOutcome, PackageOptions, PackageReport, package};

use crate::output::{format_duration, print_info, print_json, print_stat, print_success, print_warning, symbols};

pub struct PackageArgs {
  pub source_dir: PathBuf,
  pub dest_dir: PathBuf,
  pub config: Option<PathBuf>,
  pub manifest_pattern: Option<String>,
  pub export_pattern: Option<String>,
  pub skip_fixheaders: bool,
}

pub fn cmd_package(args: PackageArgs, verbose: bool, json: bool) -> Result<()> {
  let config = Config::discover(&args.source_dir, args.config.as_deref())?;

  let mut package_config = config.package;
  if let Some(pattern) = args.manifest_pattern {
    package_config.manifest_pattern = pattern;
  }
  if let Some(pattern) = args.export_pattern {
    package_config.export_pattern = pattern;
  }
  debug!(config = ?package_config, "resolved package config");

  let options =
    PackageOptions::new(args.source_dir, args.dest_dir, package_config)?.skip_fixheaders(args.skip_fixheaders);

  let dest_existed = options.dest_dir.exists();
  let started = Instant::now();
  let report = match package(&options) {
    Ok(report) => report,
    Err(e) => {
      if dest_existed && e.touches_destination() && !json {
        print_warning(&format!(
          "{} existed before this run and was left in place; it may hold a partial tree",
          options.dest_dir.display()
        ));
      }
      return Err(e.into());
    }
  };
  let elapsed = started.elapsed();

  if json {
    return print_json(&report);
  }

  if verbose {
    print_copied(&report);
  }

  print_success(&format!(
    "Packaged {} file(s) into {} in {}",
    report.files_copied(),
    report.dest_dir.display(),
    format_duration(elapsed)
  ));
  print_stat("Examples", report.examples.len());
  print_stat("Toplevel files", report.toplevel.len());
  print_stat("Shim headers", report.shims.len());

  match &report.fixheaders {
    FixheadersOutcome::Skipped => print_stat("fixheaders", "skipped"),
    FixheadersOutcome::Succeeded => print_stat("fixheaders", "ok"),
    FixheadersOutcome::Failed { code } => {
      let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
      print_warning(&format!("fixheaders failed (exit {})", code));
    }
    FixheadersOutcome::NotFound { program } => {
      print_warning(&format!("fixheaders not found: {}", program.display()));
    }
  }

  Ok(())
}

fn print_copied(report: &PackageReport) {
  for path in report.examples.iter().chain(&report.toplevel).chain(&report.sources) {
    print_info(&format!("{} {}", symbols::ARROW, path.display()));
  }
  for shim in &report.shims {
    print_info(&format!("{} {} (shim)", symbols::ARROW, shim.display()));
  }
}
