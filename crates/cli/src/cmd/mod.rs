mod package;
mod platforms;

pub use package::{PackageArgs, cmd_package};
pub use platforms::cmd_platforms;
