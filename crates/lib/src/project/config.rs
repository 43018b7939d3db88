//! Project configuration read from `quire.yaml`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_OUTPUT_DIR, PROJECT_MARKER};
use crate::error::Severity;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Could not parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("Unknown data source type: {kind}")]
  UnknownDataSource { kind: String },
}

impl ConfigError {
  pub fn severity(&self) -> Severity {
    match self {
      ConfigError::Read { .. } => Severity::Fatal,
      ConfigError::Parse { .. } | ConfigError::UnknownDataSource { .. } => Severity::Trivial,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  /// Where compiled output is written, relative to the project root.
  pub output_dir: PathBuf,
  pub data_sources: Vec<DataSourceConfig>,
  /// VCS backend used by commands that create files, unless overridden.
  pub vcs: Option<String>,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
      data_sources: vec![DataSourceConfig::default()],
      vcs: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
  #[serde(rename = "type")]
  pub kind: String,
  pub content_dir: Option<PathBuf>,
  pub layouts_dir: Option<PathBuf>,
  pub items_root: String,
  pub layouts_root: String,
}

impl Default for DataSourceConfig {
  fn default() -> Self {
    Self {
      kind: "filesystem".to_string(),
      content_dir: None,
      layouts_dir: None,
      items_root: "/".to_string(),
      layouts_root: "/".to_string(),
    }
  }
}

impl ProjectConfig {
  pub fn path(root: &Path) -> PathBuf {
    root.join(PROJECT_MARKER)
  }

  /// Read the configuration of the project rooted at `root`.
  pub fn load(root: &Path) -> Result<Self, ConfigError> {
    let path = Self::path(root);
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
      path: path.clone(),
      source,
    })?;
    Self::parse(&path, &content)
  }

  /// An empty file is a valid configuration with every default.
  pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
    if content.trim().is_empty() {
      return Ok(Self::default());
    }

    serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}
