//! The error boundary around a command.

use serde::Serialize;

use crate::error::{Severity, classify};
use crate::project::StackFrame;

/// Process exit status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
  Success,
  /// A trivial error was reported.
  UserError,
  /// A fatal error was reported.
  InternalError,
}

impl ExitStatus {
  pub fn code(self) -> u8 {
    match self {
      ExitStatus::Success => 0,
      ExitStatus::UserError => 1,
      ExitStatus::InternalError => 2,
    }
  }
}

/// Everything needed to tell the user about a failed command.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
  pub severity: Severity,
  pub message: String,
  /// Messages of the error's sources, outermost first. A source already
  /// quoted at the end of the message above it is left out.
  pub causes: Vec<String>,
  /// Build stack at the time of failure, innermost frame last.
  pub stack: Vec<StackFrame>,
}

impl Report {
  pub fn new(err: &anyhow::Error, stack: Vec<StackFrame>) -> Self {
    let severity = classify(err.chain());
    Self {
      severity,
      message: err.to_string(),
      causes: causes(err),
      // Trivial errors never show internal detail.
      stack: match severity {
        Severity::Trivial => Vec::new(),
        Severity::Fatal => stack,
      },
    }
  }

  pub fn is_trivial(&self) -> bool {
    self.severity == Severity::Trivial
  }
}

/// Source messages below the top-level one, skipping any a link already
/// spelled out at the end of its own message (`"{context}: {source}"`).
fn causes(err: &anyhow::Error) -> Vec<String> {
  let messages: Vec<String> = err.chain().map(|link| link.to_string()).collect();
  messages
    .windows(2)
    .filter(|pair| !pair[0].ends_with(&pair[1]))
    .map(|pair| pair[1].clone())
    .collect()
}

#[derive(Debug, Clone)]
pub enum Outcome {
  Success,
  Failed(Report),
}

impl Outcome {
  pub fn exit_status(&self) -> ExitStatus {
    match self {
      Outcome::Success => ExitStatus::Success,
      Outcome::Failed(report) => report.severity.into(),
    }
  }

  pub fn exit_code(&self) -> u8 {
    self.exit_status().code()
  }

  pub fn report(&self) -> Option<&Report> {
    match self {
      Outcome::Success => None,
      Outcome::Failed(report) => Some(report),
    }
  }
}

impl From<Severity> for ExitStatus {
  fn from(severity: Severity) -> Self {
    match severity {
      Severity::Trivial => ExitStatus::UserError,
      Severity::Fatal => ExitStatus::InternalError,
    }
  }
}
