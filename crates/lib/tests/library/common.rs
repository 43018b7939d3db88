//! Shared fakes for runner tests.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use quire_lib::data_source::{DataSource, DataSourceError};
use quire_lib::entity::{Item, Layout};
use quire_lib::error::LoadError;
use quire_lib::project::{Project, ProjectLoader, StackFrame};
use quire_lib::runner::{CommandRunner, RunnerOptions};
use quire_lib::vcs::{Vcs, VcsAware, VcsError, VcsRegistry};

/// Backend that only remembers its name.
#[derive(Debug)]
pub struct NamedVcs(pub &'static str);

impl Vcs for NamedVcs {
  fn name(&self) -> &str {
    self.0
  }

  fn add(&self, _path: &Path) -> Result<(), VcsError> {
    Ok(())
  }

  fn remove(&self, _path: &Path) -> Result<(), VcsError> {
    Ok(())
  }

  fn rename(&self, _src: &Path, _dst: &Path) -> Result<(), VcsError> {
    Ok(())
  }
}

pub fn test_registry() -> VcsRegistry {
  VcsRegistry::empty()
    .with("git", || Box::new(NamedVcs("git")))
    .with("hg", || Box::new(NamedVcs("hg")))
}

/// Data source without the VCS capability.
#[derive(Debug)]
pub struct PlainSource;

impl DataSource for PlainSource {
  fn kind(&self) -> &str {
    "plain"
  }

  fn load_items(&mut self) -> Result<Vec<Item>, DataSourceError> {
    Ok(vec![Item::new("/plain", "")])
  }

  fn load_layouts(&mut self) -> Result<Vec<Layout>, DataSourceError> {
    Ok(Vec::new())
  }
}

/// Data source that accepts a VCS backend.
#[derive(Debug)]
pub struct VersionedSource {
  vcs: Box<dyn Vcs>,
}

impl VersionedSource {
  pub fn new() -> Self {
    Self {
      vcs: Box::new(NamedVcs("initial")),
    }
  }
}

impl DataSource for VersionedSource {
  fn kind(&self) -> &str {
    "versioned"
  }

  fn load_items(&mut self) -> Result<Vec<Item>, DataSourceError> {
    Ok(Vec::new())
  }

  fn load_layouts(&mut self) -> Result<Vec<Layout>, DataSourceError> {
    Ok(Vec::new())
  }

  fn vcs_aware(&self) -> Option<&dyn VcsAware> {
    Some(self)
  }

  fn vcs_aware_mut(&mut self) -> Option<&mut dyn VcsAware> {
    Some(self)
  }
}

impl VcsAware for VersionedSource {
  fn vcs(&self) -> &dyn Vcs {
    self.vcs.as_ref()
  }

  fn set_vcs(&mut self, vcs: Box<dyn Vcs>) {
    self.vcs = vcs;
  }
}

/// Loader adding a plain and a versioned source, counting its calls.
#[derive(Clone, Default)]
pub struct FakeLoader {
  pub calls: Rc<Cell<usize>>,
  pub fail: bool,
  pub frames: Vec<StackFrame>,
}

impl ProjectLoader for FakeLoader {
  fn load(&self, project: &mut Project) -> Result<(), LoadError> {
    self.calls.set(self.calls.get() + 1);
    project.add_data_source(Box::new(PlainSource));
    if self.fail {
      return Err("data source exploded".into());
    }
    project.add_data_source(Box::new(VersionedSource::new()));
    for frame in &self.frames {
      project.push_frame(frame.clone());
    }
    Ok(())
  }
}

/// Runner whose working directory is (`in_project`) or is not a project.
pub fn runner(in_project: bool, loader: FakeLoader) -> CommandRunner {
  CommandRunner::new(RunnerOptions::new("/srv/site"))
    .with_probe(move |_: &Path| in_project)
    .with_loader(loader)
    .with_vcs_registry(test_registry())
}

/// Names of the VCS backends installed on each source, `None` for sources
/// without the capability.
pub fn installed_vcs(runner: &mut CommandRunner) -> Vec<Option<String>> {
  runner
    .project()
    .map(|context| {
      context
        .project()
        .data_sources()
        .iter()
        .map(|source| source.vcs_aware().map(|aware| aware.vcs().name().to_string()))
        .collect()
    })
    .unwrap_or_default()
}
