//! Data sources: providers of items and layouts for a project.
//!
//! The command layer treats a data source as opaque apart from two optional
//! capabilities, both discovered through accessor methods that return `None`
//! by default:
//! - [`DataSource::vcs_aware_mut`]: accepts a version-control backend
//! - [`DataSource::writer`]: can persist new items and layouts

mod filesystem;
pub mod front_matter;
mod registry;
mod static_files;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::entity::{Item, Layout};
use crate::error::Severity;
use crate::vcs::{VcsAware, VcsError};

pub use filesystem::FilesystemDataSource;
pub use registry::{DataSourceConstructor, DataSourceRegistry};
pub use static_files::StaticDataSource;

#[derive(Debug, Error)]
pub enum DataSourceError {
  #[error("failed to walk {}: {source}", path.display())]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid front matter in {}: {source}", path.display())]
  FrontMatter {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("failed to serialize attributes for {identifier}: {source}")]
  Serialize {
    identifier: String,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("{} and {} share the identifier {identifier}", first.display(), second.display())]
  DuplicateIdentifier {
    identifier: String,
    first: PathBuf,
    second: PathBuf,
  },

  #[error("An entity with identifier {identifier} already exists")]
  AlreadyExists { identifier: String },

  #[error("{identifier} is not a valid identifier")]
  InvalidIdentifier { identifier: String },

  #[error("{identifier} is outside {root}, the root of its data source")]
  OutsideRoot { identifier: String, root: String },

  #[error("No entity with identifier {identifier} exists")]
  NotFound { identifier: String },

  #[error("None of the project's data sources can create new entities")]
  NoWritableSource,

  #[error(transparent)]
  Vcs(#[from] VcsError),
}

impl DataSourceError {
  pub fn severity(&self) -> Severity {
    match self {
      DataSourceError::FrontMatter { .. }
      | DataSourceError::DuplicateIdentifier { .. }
      | DataSourceError::AlreadyExists { .. }
      | DataSourceError::InvalidIdentifier { .. }
      | DataSourceError::OutsideRoot { .. }
      | DataSourceError::NotFound { .. }
      | DataSourceError::NoWritableSource => Severity::Trivial,
      _ => Severity::Fatal,
    }
  }
}

/// A provider of content entities.
pub trait DataSource: std::fmt::Debug {
  /// Type name this source was configured with.
  fn kind(&self) -> &str;

  fn load_items(&mut self) -> Result<Vec<Item>, DataSourceError>;

  fn load_layouts(&mut self) -> Result<Vec<Layout>, DataSourceError>;

  /// Version-control capability, if this source accepts a backend.
  fn vcs_aware(&self) -> Option<&dyn VcsAware> {
    None
  }

  fn vcs_aware_mut(&mut self) -> Option<&mut dyn VcsAware> {
    None
  }

  /// Write capability, if this source can persist new entities.
  fn writer(&mut self) -> Option<&mut dyn EntityWriter> {
    None
  }
}

/// Persists entities created by commands.
pub trait EntityWriter {
  /// Write a new item and return the path it was written to.
  fn create_item(&mut self, item: &Item) -> Result<PathBuf, DataSourceError>;

  fn create_layout(&mut self, layout: &Layout) -> Result<PathBuf, DataSourceError>;

  fn delete_item(&mut self, identifier: &str) -> Result<(), DataSourceError>;
}
