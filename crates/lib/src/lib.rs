//! distpack-lib: platform table and standalone source packaging
//!
//! This crate provides:
//! - `PlatformTable`: read-only cross-compilation platform descriptors
//! - `Config`: TOML configuration for packaging runs and platform tables
//! - `package`: copy a project's manifest-listed sources into a standalone
//!   tree with include shims for exported classes

pub mod config;
pub mod consts;
pub mod package;
pub mod platform;

pub use config::{Config, ConfigError, FixheadersConfig, PackageConfig};
pub use package::{FixheadersOutcome, PackageError, PackageOptions, PackageReport, package};
pub use platform::{Arch, HostOs, PlatformDescriptor, PlatformError, PlatformTable};
