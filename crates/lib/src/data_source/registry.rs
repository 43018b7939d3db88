use std::collections::BTreeMap;
use std::path::Path;

use crate::project::config::DataSourceConfig;

use super::{DataSource, FilesystemDataSource, StaticDataSource};

/// Builds a data source for a project rooted at the given path.
pub type DataSourceConstructor = fn(&Path, &DataSourceConfig) -> Box<dyn DataSource>;

/// Data source type name to constructor.
#[derive(Debug, Clone, Default)]
pub struct DataSourceRegistry {
  entries: BTreeMap<String, DataSourceConstructor>,
}

impl DataSourceRegistry {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn builtin() -> Self {
    Self::empty()
      .with("filesystem", |root, config| {
        Box::new(FilesystemDataSource::from_config(root, config))
      })
      .with("static", |root, config| Box::new(StaticDataSource::from_config(root, config)))
  }

  pub fn with(mut self, kind: impl Into<String>, constructor: DataSourceConstructor) -> Self {
    self.entries.insert(kind.into(), constructor);
    self
  }

  pub fn named(&self, kind: &str) -> Option<DataSourceConstructor> {
    self.entries.get(kind).copied()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }
}
