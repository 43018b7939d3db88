use tracing::{debug, info};

use crate::data_source::DataSourceRegistry;
use crate::error::LoadError;

use super::config::{ConfigError, ProjectConfig};
use super::Project;

/// Populates a project's data sources and entities.
///
/// Errors are opaque to the command layer: they are wrapped in
/// [`crate::Error::LoadFailure`] and classified by their own type.
pub trait ProjectLoader {
  fn load(&self, project: &mut Project) -> Result<(), LoadError>;
}

/// Loads a project from its `quire.yaml`, building one data source per
/// configured entry.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
  data_sources: DataSourceRegistry,
}

impl ConfigLoader {
  pub fn new(data_sources: DataSourceRegistry) -> Self {
    Self { data_sources }
  }
}

impl Default for ConfigLoader {
  fn default() -> Self {
    Self::new(DataSourceRegistry::builtin())
  }
}

impl ProjectLoader for ConfigLoader {
  fn load(&self, project: &mut Project) -> Result<(), LoadError> {
    let config = ProjectConfig::load(project.root())?;

    for source_config in &config.data_sources {
      let constructor = self
        .data_sources
        .named(&source_config.kind)
        .ok_or_else(|| ConfigError::UnknownDataSource {
          kind: source_config.kind.clone(),
        })?;

      let mut source = constructor(project.root(), source_config);
      let items = source.load_items()?;
      let layouts = source.load_layouts()?;
      debug!(
        kind = %source.kind(),
        items = items.len(),
        layouts = layouts.len(),
        "loaded data source"
      );

      project.extend_items(items);
      project.extend_layouts(layouts);
      project.add_data_source(source);
    }

    info!(
      root = %project.root().display(),
      data_sources = project.data_sources().len(),
      items = project.items().len(),
      layouts = project.layouts().len(),
      "project loaded"
    );
    project.set_config(config);
    Ok(())
  }
}
