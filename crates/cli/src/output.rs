//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output: colored status
//! messages, Unicode symbols, JSON output, and error reports.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use quire_lib::runner::Report;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
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

/// Print a failed command's report to stderr.
///
/// Trivial errors get one line (plus causes with `--debug`). Fatal errors get
/// the cause chain and the build stack, innermost frame first.
pub fn print_report(report: &Report, debug: bool) {
  if report.is_trivial() {
    print_error(&report.message);
    if debug {
      for cause in &report.causes {
        eprintln!("  {} {}", symbols::ARROW, cause);
      }
    }
    return;
  }

  eprintln!();
  eprintln!(
    "{}",
    "Unexpected error".if_supports_color(Stream::Stderr, |s| s.bold())
  );
  print_error(&report.message);

  if !report.causes.is_empty() {
    eprintln!();
    eprintln!("Caused by:");
    for (index, cause) in report.causes.iter().enumerate() {
      eprintln!("  {}: {}", index, cause);
    }
  }

  eprintln!();
  eprintln!("Build stack:");
  if report.stack.is_empty() {
    eprintln!("  {}", "(empty)".if_supports_color(Stream::Stderr, |s| s.dimmed()));
  }
  for frame in report.stack.iter().rev() {
    eprintln!("  {} {}", symbols::ARROW, frame);
  }

  eprintln!();
  eprintln!(
    "{} This is most likely a bug in quire. Please report it along with the output above.",
    symbols::INFO.if_supports_color(Stream::Stderr, |s| s.blue())
  );
}
