use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::attributes::{AttributeStore, AttributeValue};
use crate::consts::DEFAULT_STATIC_DIR;
use crate::entity::{Item, Layout};
use crate::project::config::DataSourceConfig;

use super::{DataSource, DataSourceError};

/// Files copied verbatim into the output, exposed as content-less items.
///
/// Static files are never created by commands, so this source accepts no VCS
/// backend.
#[derive(Debug)]
pub struct StaticDataSource {
  dir: PathBuf,
  items_root: String,
}

impl StaticDataSource {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self {
      dir: dir.into(),
      items_root: "/".to_string(),
    }
  }

  pub fn from_config(project_root: &Path, config: &DataSourceConfig) -> Self {
    let dir = config
      .content_dir
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

    let mut source = Self::new(project_root.join(dir));
    source.items_root = config.items_root.clone();
    source
  }
}

impl DataSource for StaticDataSource {
  fn kind(&self) -> &str {
    "static"
  }

  fn load_items(&mut self) -> Result<Vec<Item>, DataSourceError> {
    let mut items = Vec::new();
    if !self.dir.is_dir() {
      debug!(dir = %self.dir.display(), "static directory does not exist");
      return Ok(items);
    }

    for entry in WalkDir::new(&self.dir).min_depth(1).sort_by_file_name() {
      let entry = entry.map_err(|source| DataSourceError::Walk {
        path: self.dir.clone(),
        source,
      })?;
      if !entry.file_type().is_file() {
        continue;
      }
      let Ok(relative) = entry.path().strip_prefix(&self.dir) else {
        continue;
      };

      let filename = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

      // Static identifiers keep the extension; `logo.png` and `logo.svg` are
      // distinct files.
      let identifier = format!("{}/{}", self.items_root.trim_end_matches('/'), filename);
      let attributes: AttributeStore = [("filename", AttributeValue::from(filename)), ("binary", AttributeValue::from(true))]
        .into_iter()
        .collect();
      items.push(Item::new(identifier, "").with_attributes(attributes));
    }

    Ok(items)
  }

  fn load_layouts(&mut self) -> Result<Vec<Layout>, DataSourceError> {
    Ok(Vec::new())
  }
}
