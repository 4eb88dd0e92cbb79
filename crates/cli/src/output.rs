//! Terminal output for distpack.
//!
//! Everything the user reads goes to stdout: status lines, failures and JSON.
//! Logs from `tracing` go to stderr.

use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use owo_colors::{AnsiColors, OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    format!("{}m {}s", secs / 60, secs % 60)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

/// One status line: a colored symbol, then the message, colored too when
/// `tint_message` is set.
fn status_line(symbol: &str, color: AnsiColors, message: &str, tint_message: bool) {
  let symbol = symbol.if_supports_color(Stream::Stdout, |s| s.color(color));
  if tint_message {
    println!(
      "{} {}",
      symbol,
      message.if_supports_color(Stream::Stdout, |s| s.color(color))
    );
  } else {
    println!("{} {}", symbol, message);
  }
}

pub fn print_success(message: &str) {
  status_line(symbols::SUCCESS, AnsiColors::Green, message, false);
}

pub fn print_warning(message: &str) {
  status_line(symbols::WARNING, AnsiColors::Yellow, message, true);
}

pub fn print_info(message: &str) {
  status_line(symbols::INFO, AnsiColors::Blue, message, false);
}

/// `label: value`, label dimmed.
pub fn print_stat(label: &str, value: impl Display) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// JSON body reported for a failed command.
pub fn failure_json(message: &str, code: u8) -> serde_json::Value {
  serde_json::json!({ "error": message, "code": code })
}

/// Report a failed command, as a red line or as a JSON object.
pub fn print_failure(message: &str, code: u8, json: bool) {
  if json {
    // Serializing a `Value` cannot fail.
    let _ = print_json(&failure_json(message, code));
  } else {
    status_line(symbols::ERROR, AnsiColors::Red, message, true);
  }
}
