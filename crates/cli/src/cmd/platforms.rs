use std::path::Path;

use anyhow::Result;

use distpack_lib::{Config, PlatformDescriptor};

use crate::output::print_json;

pub fn cmd_platforms(source_dir: &Path, config: Option<&Path>, family: Option<&str>, json: bool) -> Result<()> {
  let table = Config::discover(source_dir, config)?.platform_table()?;

  let platforms: Vec<&PlatformDescriptor> = match family {
    Some(tag) => table.with_family(tag).collect(),
    None => table.iter().collect(),
  };

  if json {
    return print_json(&platforms);
  }

  for platform in platforms {
    println!(
      "{:<20} {:<8} {:<8} {:<12} {}",
      platform.id,
      platform.host_os.as_str(),
      platform.arch.as_str(),
      platform.distro,
      platform.families.join(",")
    );
  }

  Ok(())
}
