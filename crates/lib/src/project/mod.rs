//! The in-memory project model and its per-invocation context.

pub mod config;
mod context;
mod loader;
mod probe;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::data_source::{DataSource, DataSourceError};
use crate::entity::{Document, Item, Layout};

pub use config::{ConfigError, DataSourceConfig, ProjectConfig};
pub use context::{LoadState, ProjectContext};
pub use loader::{ConfigLoader, ProjectLoader};
pub use probe::{MarkerProbe, ProjectProbe};

/// One entry of the build stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StackFrame {
  Item { identifier: String },
  Layout { identifier: String },
}

impl fmt::Display for StackFrame {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StackFrame::Item { identifier } => write!(f, "item {}", identifier),
      StackFrame::Layout { identifier } => write!(f, "layout {}", identifier),
    }
  }
}

/// A loaded content project: its data sources, their entities, and the
/// stack of entities currently being worked on.
#[derive(Debug)]
pub struct Project {
  root: PathBuf,
  config: ProjectConfig,
  data_sources: Vec<Box<dyn DataSource>>,
  items: Vec<Item>,
  layouts: Vec<Layout>,
  stack: Vec<StackFrame>,
}

impl Project {
  /// An empty project rooted at `root`; nothing is read from disk.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      config: ProjectConfig::default(),
      data_sources: Vec::new(),
      items: Vec::new(),
      layouts: Vec::new(),
      stack: Vec::new(),
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn config(&self) -> &ProjectConfig {
    &self.config
  }

  pub fn set_config(&mut self, config: ProjectConfig) {
    self.config = config;
  }

  pub fn data_sources(&self) -> &[Box<dyn DataSource>] {
    &self.data_sources
  }

  pub fn data_sources_mut(&mut self) -> &mut [Box<dyn DataSource>] {
    &mut self.data_sources
  }

  pub fn add_data_source(&mut self, source: Box<dyn DataSource>) {
    self.data_sources.push(source);
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn layouts(&self) -> &[Layout] {
    &self.layouts
  }

  pub fn item(&self, identifier: &str) -> Option<&Item> {
    self.items.iter().find(|i| i.identifier() == identifier)
  }

  pub fn item_mut(&mut self, identifier: &str) -> Option<&mut Item> {
    self.items.iter_mut().find(|i| i.identifier() == identifier)
  }

  pub fn layout(&self, identifier: &str) -> Option<&Layout> {
    self.layouts.iter().find(|l| l.identifier() == identifier)
  }

  pub fn layout_mut(&mut self, identifier: &str) -> Option<&mut Layout> {
    self.layouts.iter_mut().find(|l| l.identifier() == identifier)
  }

  pub fn extend_items(&mut self, items: impl IntoIterator<Item = Item>) {
    self.items.extend(items);
  }

  pub fn extend_layouts(&mut self, layouts: impl IntoIterator<Item = Layout>) {
    self.layouts.extend(layouts);
  }

  /// Frames in push order, innermost last.
  pub fn stack(&self) -> &[StackFrame] {
    &self.stack
  }

  pub fn push_frame(&mut self, frame: StackFrame) {
    debug!(frame = %frame, depth = self.stack.len() + 1, "push build frame");
    self.stack.push(frame);
  }

  pub fn pop_frame(&mut self) -> Option<StackFrame> {
    self.stack.pop()
  }

  /// Persist a new item through the first data source that can write, and
  /// add it to the project.
  pub fn create_item(&mut self, item: Item) -> Result<PathBuf, DataSourceError> {
    if self.item(item.identifier()).is_some() {
      return Err(DataSourceError::AlreadyExists {
        identifier: item.identifier().to_string(),
      });
    }

    let writer = self
      .data_sources
      .iter_mut()
      .find_map(|source| source.writer())
      .ok_or(DataSourceError::NoWritableSource)?;

    let path = writer.create_item(&item)?;
    self.items.push(item);
    Ok(path)
  }

  pub fn create_layout(&mut self, layout: Layout) -> Result<PathBuf, DataSourceError> {
    if self.layout(layout.identifier()).is_some() {
      return Err(DataSourceError::AlreadyExists {
        identifier: layout.identifier().to_string(),
      });
    }

    let writer = self
      .data_sources
      .iter_mut()
      .find_map(|source| source.writer())
      .ok_or(DataSourceError::NoWritableSource)?;

    let path = writer.create_layout(&layout)?;
    self.layouts.push(layout);
    Ok(path)
  }
}
