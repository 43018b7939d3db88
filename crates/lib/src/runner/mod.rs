//! Per-invocation command runner.
//!
//! A [`CommandRunner`] is created once per CLI call. It owns the lazily
//! acquired [`ProjectContext`], runs the command body inside the error
//! boundary, and wires version-control backends into data sources.

mod handler;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::consts::VCS_ENV_VAR;
use crate::error::{Error, Severity};
use crate::project::{ConfigLoader, LoadState, MarkerProbe, Project, ProjectContext, ProjectLoader, ProjectProbe, StackFrame};
use crate::vcs::VcsRegistry;

pub use handler::{ExitStatus, Outcome, Report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOptions {
  /// Directory the command runs in; the project root if it is one.
  pub cwd: PathBuf,
  /// VCS backend to fall back on when neither the command nor the project
  /// configuration names one.
  pub default_vcs: Option<String>,
}

impl RunnerOptions {
  pub fn new(cwd: impl Into<PathBuf>) -> Self {
    Self {
      cwd: cwd.into(),
      default_vcs: None,
    }
  }

  /// Options for `cwd` with the fallback VCS read from `QUIRE_VCS`.
  pub fn from_env(cwd: impl Into<PathBuf>) -> Self {
    Self {
      cwd: cwd.into(),
      default_vcs: std::env::var(VCS_ENV_VAR).ok().filter(|name| !name.is_empty()),
    }
  }
}

pub struct CommandRunner {
  options: RunnerOptions,
  probe: Box<dyn ProjectProbe>,
  loader: Box<dyn ProjectLoader>,
  vcs_registry: VcsRegistry,
  context: Option<ProjectContext>,
}

impl CommandRunner {
  pub fn new(options: RunnerOptions) -> Self {
    Self {
      options,
      probe: Box::new(MarkerProbe::default()),
      loader: Box::new(ConfigLoader::default()),
      vcs_registry: VcsRegistry::builtin(),
      context: None,
    }
  }

  pub fn with_probe(mut self, probe: impl ProjectProbe + 'static) -> Self {
    self.probe = Box::new(probe);
    self
  }

  pub fn with_loader(mut self, loader: impl ProjectLoader + 'static) -> Self {
    self.loader = Box::new(loader);
    self
  }

  pub fn with_vcs_registry(mut self, registry: VcsRegistry) -> Self {
    self.vcs_registry = registry;
    self
  }

  pub fn options(&self) -> &RunnerOptions {
    &self.options
  }

  pub fn vcs_registry(&self) -> &VcsRegistry {
    &self.vcs_registry
  }

  /// Run a command body inside the error boundary.
  ///
  /// This is the only place command errors are caught. The returned outcome
  /// carries the report and exit status; printing it is up to the caller.
  pub fn call<F>(&mut self, operation: F) -> Outcome
  where
    F: FnOnce(&mut CommandRunner) -> anyhow::Result<()>,
  {
    match operation(self) {
      Ok(()) => Outcome::Success,
      Err(err) => {
        let report = Report::new(&err, self.stack());
        match report.severity {
          Severity::Trivial => debug!(error = %err, "command failed"),
          Severity::Fatal => debug!(error = ?err, stack_depth = report.stack.len(), "command failed unexpectedly"),
        }
        Outcome::Failed(report)
      }
    }
  }

  /// Whether the working directory is a project root.
  pub fn in_project_dir(&self) -> bool {
    self.probe.is_project_dir(&self.options.cwd)
  }

  fn ensure_context(&mut self) {
    if self.context.is_none() && self.in_project_dir() {
      let root = dunce::canonicalize(&self.options.cwd).unwrap_or_else(|_| self.options.cwd.clone());
      debug!(root = %root.display(), "found project");
      self.context = Some(ProjectContext::new(root));
    }
  }

  /// The project context of this invocation, created on first call.
  ///
  /// Returns `None` outside a project directory. Nothing is loaded.
  pub fn project(&mut self) -> Option<&mut ProjectContext> {
    self.ensure_context();
    self.context.as_mut()
  }

  /// The loaded project, loading it on first call.
  pub fn load_project(&mut self) -> Result<&mut Project, Error> {
    self.ensure_context();
    let Some(context) = self.context.as_mut() else {
      return Err(Error::NoProjectFound {
        dir: self.options.cwd.clone(),
      });
    };
    context.load(self.loader.as_ref())
  }

  /// Install a fresh instance of the named VCS backend on every data source
  /// that accepts one.
  ///
  /// Does nothing when `name` is absent or empty, or outside a project.
  /// Sources without the capability are skipped. The name is resolved before
  /// any source is touched, so an unknown name changes nothing.
  pub fn configure_vcs(&mut self, name: Option<&str>) -> Result<(), Error> {
    let Some(name) = name.filter(|name| !name.is_empty()) else {
      return Ok(());
    };

    self.ensure_context();
    let Some(context) = self.context.as_mut() else {
      debug!(vcs = %name, "not in a project, skipping vcs setup");
      return Ok(());
    };

    match context.state() {
      LoadState::Poisoned | LoadState::Loading => return Err(Error::ProjectPoisoned),
      LoadState::Unloaded => debug!(vcs = %name, "project not loaded, no data sources to configure"),
      LoadState::Loaded => {}
    }

    let constructor = self.vcs_registry.named(name).ok_or_else(|| Error::UnknownBackend {
      name: name.to_string(),
    })?;

    let mut configured = 0;
    for source in context.project_mut().data_sources_mut() {
      match source.vcs_aware_mut() {
        Some(aware) => {
          aware.set_vcs(constructor());
          configured += 1;
        }
        None => debug!(kind = %source.kind(), "data source does not support version control, skipping"),
      }
    }

    info!(vcs = %name, data_sources = configured, "configured version control");
    Ok(())
  }

  /// The current build stack, or nothing if no project is loaded.
  pub fn stack(&self) -> Vec<StackFrame> {
    self.context.as_ref().map(ProjectContext::stack).unwrap_or_default()
  }
}
