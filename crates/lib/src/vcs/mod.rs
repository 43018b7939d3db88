//! Pluggable version-control backends.
//!
//! A data source that writes files can opt into version control by
//! implementing [`VcsAware`]. Backends are looked up by symbolic name in a
//! [`VcsRegistry`] and a fresh instance is installed on every data source that
//! accepts one.

mod command;
mod registry;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use command::{CommandVcs, NoopVcs};
pub use registry::{VcsConstructor, VcsRegistry};

#[derive(Debug, Error)]
pub enum VcsError {
  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("{program} {subcommand} exited with code {code:?}: {stderr}")]
  CommandFailed {
    program: String,
    subcommand: String,
    code: Option<i32>,
    stderr: String,
  },

  #[error("failed to update {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Operations a data source performs on files it manages.
///
/// `add` registers a file that already exists on disk. `remove` and `rename`
/// perform the filesystem change themselves.
pub trait Vcs: std::fmt::Debug {
  /// Canonical backend name; aliases such as `hg` report `mercurial`.
  fn name(&self) -> &str;

  fn add(&self, path: &Path) -> Result<(), VcsError>;

  fn remove(&self, path: &Path) -> Result<(), VcsError>;

  fn rename(&self, src: &Path, dst: &Path) -> Result<(), VcsError>;
}

/// Capability implemented by data sources that accept a VCS backend.
pub trait VcsAware {
  fn vcs(&self) -> &dyn Vcs;

  fn set_vcs(&mut self, vcs: Box<dyn Vcs>);
}
