//! Error kinds raised by the command layer and their classification.
//!
//! Every failure that reaches the command boundary is sorted into one of two
//! tiers. Trivial errors are the user's to fix and only need a short message.
//! Everything else is fatal: an unexpected condition that gets a full
//! diagnostic report.

use std::error::Error as StdError;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::data_source::DataSourceError;
use crate::project::config::ConfigError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Opaque error produced by a project loader.
pub type LoadError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  /// User-facing failure; print the message and exit.
  Trivial,
  /// Unexpected failure; print full diagnostics and exit.
  Fatal,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("The current working directory does not seem to be a quire project: {}", dir.display())]
  NoProjectFound { dir: PathBuf },

  #[error("A VCS named {name} was not found")]
  UnknownBackend { name: String },

  #[error("failed to load project data: {source}")]
  LoadFailure {
    #[source]
    source: LoadError,
  },

  #[error("project data is unusable after an earlier load failure")]
  ProjectPoisoned,

  #[error("{0}")]
  Trivial(String),
}

impl Error {
  /// A user-facing error carrying only a message.
  pub fn trivial(message: impl Into<String>) -> Self {
    Error::Trivial(message.into())
  }

  pub fn load(source: impl Into<LoadError>) -> Self {
    Error::LoadFailure { source: source.into() }
  }

  /// Load failures inherit the classification of whatever they wrap; an
  /// unrecognized cause is fatal.
  pub fn severity(&self) -> Severity {
    match self {
      Error::NoProjectFound { .. } | Error::UnknownBackend { .. } | Error::Trivial(_) => Severity::Trivial,
      Error::LoadFailure { source } => classify(sources(&**source)),
      Error::ProjectPoisoned => Severity::Fatal,
    }
  }

  pub fn is_trivial(&self) -> bool {
    self.severity() == Severity::Trivial
  }
}

/// Classify an error chain, outermost first.
///
/// The first link that is one of this crate's error types decides the tier.
/// A chain with no recognized link is fatal.
pub fn classify<'a, I>(chain: I) -> Severity
where
  I: IntoIterator<Item = &'a (dyn StdError + 'static)>,
{
  chain.into_iter().find_map(known_severity).unwrap_or(Severity::Fatal)
}

/// Iterate an error and its sources, outermost first.
pub fn sources<'a>(err: &'a (dyn StdError + 'static)) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
  std::iter::successors(Some(err), |e| (*e).source())
}

fn known_severity(err: &(dyn StdError + 'static)) -> Option<Severity> {
  if let Some(e) = err.downcast_ref::<Error>() {
    return Some(e.severity());
  }
  if let Some(e) = err.downcast_ref::<ConfigError>() {
    return Some(e.severity());
  }
  if let Some(e) = err.downcast_ref::<DataSourceError>() {
    return Some(e.severity());
  }
  None
}
