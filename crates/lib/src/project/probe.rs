use std::path::Path;

use crate::consts::PROJECT_MARKER;

/// Decides whether a directory is a project root. Must not have side effects.
pub trait ProjectProbe {
  fn is_project_dir(&self, dir: &Path) -> bool;
}

impl<F> ProjectProbe for F
where
  F: Fn(&Path) -> bool,
{
  fn is_project_dir(&self, dir: &Path) -> bool {
    self(dir)
  }
}

/// A directory is a project root when it contains a marker file.
#[derive(Debug, Clone)]
pub struct MarkerProbe {
  marker: String,
}

impl MarkerProbe {
  pub fn new(marker: impl Into<String>) -> Self {
    Self { marker: marker.into() }
  }
}

impl Default for MarkerProbe {
  fn default() -> Self {
    Self::new(PROJECT_MARKER)
  }
}

impl ProjectProbe for MarkerProbe {
  fn is_project_dir(&self, dir: &Path) -> bool {
    dir.join(&self.marker).is_file()
  }
}
