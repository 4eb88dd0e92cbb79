use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use distpack_lib::consts::exit_code;
use distpack_lib::{ConfigError, PackageError, PlatformError};

mod cmd;
mod output;

use cmd::{PackageArgs, cmd_package, cmd_platforms};
use output::print_failure;

/// distpack - package a project's sources into a standalone tree
#[derive(Parser)]
#[command(name = "distpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Print each copied file and enable debug logging
  #[arg(short, long)]
  verbose: bool,

  /// Destination directory for the standalone tree
  #[arg(
    short = 'o',
    long = "destdir",
    value_name = "PATH",
    required_unless_present = "list_platforms"
  )]
  destdir: Option<PathBuf>,

  /// Project source directory
  #[arg(short = 's', long = "sourcedir", value_name = "PATH", default_value = "..")]
  sourcedir: PathBuf,

  /// Config file (default: distpack.toml in the source directory, if present)
  #[arg(short, long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Regex extracting filenames from manifest lines (group 1 if present)
  #[arg(long, value_name = "REGEX")]
  manifest_pattern: Option<String>,

  /// Regex matching exported class declarations (class name in group 1)
  #[arg(long, value_name = "REGEX")]
  export_pattern: Option<String>,

  /// Do not run fixheaders on the packaged tree
  #[arg(long)]
  skip_fixheaders: bool,

  /// Print the platform table instead of packaging
  #[arg(long, conflicts_with = "destdir")]
  list_platforms: bool,

  /// Only list platforms carrying this family tag
  #[arg(long, value_name = "TAG", requires = "list_platforms")]
  family: Option<String>,

  /// Output as JSON
  #[arg(long)]
  json: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let json = cli.json;
  let result = match cli.destdir {
    Some(dest_dir) if !cli.list_platforms => cmd_package(
      PackageArgs {
        source_dir: cli.sourcedir,
        dest_dir,
        config: cli.config,
        manifest_pattern: cli.manifest_pattern,
        export_pattern: cli.export_pattern,
        skip_fixheaders: cli.skip_fixheaders,
      },
      cli.verbose,
      cli.json,
    ),
    _ => cmd_platforms(&cli.sourcedir, cli.config.as_deref(), cli.family.as_deref(), cli.json),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      let code = failure_code(&e);
      print_failure(&e.to_string(), code, json);
      ExitCode::from(code)
    }
  }
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

/// Exit code for a failed command, by failure kind.
fn failure_code(err: &anyhow::Error) -> u8 {
  if let Some(e) = err.downcast_ref::<PackageError>() {
    e.exit_code()
  } else if err.is::<ConfigError>() || err.is::<PlatformError>() {
    exit_code::USAGE
  } else {
    1
  }
}
