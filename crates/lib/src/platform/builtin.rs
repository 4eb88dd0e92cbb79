//! Builtin cross-compilation targets.

use super::{Arch, HostOs, PlatformDescriptor};

pub(super) fn platforms() -> Vec<PlatformDescriptor> {
  vec![
    PlatformDescriptor::new(
      "greenphone",
      HostOs::Linux,
      Arch::Arm,
      "greenphone",
      &["unix", "linux", "embedded", "arm", "greenphone"],
    ),
    PlatformDescriptor::new(
      "neo",
      HostOs::Linux,
      Arch::Arm,
      "openmoko",
      &["unix", "linux", "embedded", "arm", "neo"],
    ),
    PlatformDescriptor::new(
      "arm-linux-gnueabi",
      HostOs::Linux,
      Arch::Arm,
      "debian",
      &["unix", "linux", "arm", "gnueabi"],
    ),
    PlatformDescriptor::new(
      "mipsel-linux",
      HostOs::Linux,
      Arch::Mips,
      "generic",
      &["unix", "linux", "embedded", "mips"],
    ),
    PlatformDescriptor::new("x86-linux", HostOs::Linux, Arch::X86, "generic", &["unix", "linux", "x86"]),
    PlatformDescriptor::new(
      "x86_64-linux",
      HostOs::Linux,
      Arch::X86_64,
      "generic",
      &["unix", "linux", "x86", "x86_64"],
    ),
    PlatformDescriptor::new(
      "x86_64-darwin",
      HostOs::MacOs,
      Arch::X86_64,
      "generic",
      &["unix", "darwin", "x86", "x86_64"],
    ),
    PlatformDescriptor::new("i686-mingw32", HostOs::Windows, Arch::X86, "mingw", &["win32", "mingw", "x86"]),
  ]
}
