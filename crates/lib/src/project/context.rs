use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::Error;

use super::{Project, ProjectLoader, StackFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
  Unloaded,
  Loading,
  Loaded,
  /// A load attempt failed; the project may be partially populated and is
  /// not loaded again in this invocation.
  Poisoned,
}

/// Handle to the project of the current invocation.
///
/// Created unloaded; [`ProjectContext::load`] runs the loader at most once.
#[derive(Debug)]
pub struct ProjectContext {
  state: LoadState,
  project: Project,
}

impl ProjectContext {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      state: LoadState::Unloaded,
      project: Project::new(root),
    }
  }

  pub fn state(&self) -> LoadState {
    self.state
  }

  pub fn is_loaded(&self) -> bool {
    self.state == LoadState::Loaded
  }

  pub fn project(&self) -> &Project {
    &self.project
  }

  pub fn project_mut(&mut self) -> &mut Project {
    &mut self.project
  }

  /// Load the project unless it already is.
  ///
  /// A failed load poisons the context: the error is returned once as
  /// [`Error::LoadFailure`] and every later call fails with
  /// [`Error::ProjectPoisoned`].
  pub fn load(&mut self, loader: &dyn ProjectLoader) -> Result<&mut Project, Error> {
    match self.state {
      LoadState::Loaded => return Ok(&mut self.project),
      LoadState::Poisoned | LoadState::Loading => return Err(Error::ProjectPoisoned),
      LoadState::Unloaded => {}
    }

    debug!(root = %self.project.root().display(), "loading project data");
    self.state = LoadState::Loading;

    match loader.load(&mut self.project) {
      Ok(()) => {
        self.state = LoadState::Loaded;
        Ok(&mut self.project)
      }
      Err(source) => {
        warn!(root = %self.project.root().display(), error = %source, "project load failed");
        self.state = LoadState::Poisoned;
        Err(Error::LoadFailure { source })
      }
    }
  }

  /// The build stack of a loaded project; empty otherwise.
  pub fn stack(&self) -> Vec<StackFrame> {
    if self.is_loaded() {
      self.project.stack().to_vec()
    } else {
      Vec::new()
    }
  }
}
