/// Config file looked up in the source directory when none is given
pub const CONFIG_FILE_NAME: &str = "distpack.toml";

/// Suffix marking a private header, which is copied but never scanned for shims
pub const PRIVATE_HEADER_SUFFIX: &str = "_p.h";

/// Default manifest pattern: one `cpp`/`h` filename per match, captured in group 1.
/// Leading `../` is captured too so escaping entries can be rejected whole.
pub const DEFAULT_MANIFEST_PATTERN: &str = r"((?:\.\./)*[A-Za-z0-9_][A-Za-z0-9_/]*\.(?:cpp|h))\b";

/// Default export pattern: an export-macro-annotated class declaration, class name in group 1
pub const DEFAULT_EXPORT_PATTERN: &str = r"^\s*class\s+[A-Z][A-Z0-9_]*_EXPORT\s+([A-Za-z_][A-Za-z0-9_]*)";

/// Process exit codes reported for each failure kind
pub mod exit_code {
  pub const USAGE: u8 = 2;
  pub const MANIFEST_UNREADABLE: u8 = 3;
  pub const NO_SOURCE_FILES: u8 = 4;
  pub const CREATE_DIR: u8 = 5;
  pub const COPY: u8 = 6;
}
