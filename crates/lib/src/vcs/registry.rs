use std::collections::BTreeMap;

use super::{CommandVcs, NoopVcs, Vcs};

/// Builds a fresh backend instance.
pub type VcsConstructor = fn() -> Box<dyn Vcs>;

/// Symbolic name to backend constructor.
///
/// A registry is assembled once with [`VcsRegistry::with`] and only read
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct VcsRegistry {
  entries: BTreeMap<String, VcsConstructor>,
}

impl VcsRegistry {
  pub fn empty() -> Self {
    Self::default()
  }

  /// Registry with every backend shipped with quire.
  pub fn builtin() -> Self {
    Self::empty()
      .with("noop", || Box::new(NoopVcs))
      .with("git", || Box::new(CommandVcs::git()))
      .with("mercurial", || Box::new(CommandVcs::mercurial()))
      .with("hg", || Box::new(CommandVcs::mercurial()))
      .with("subversion", || Box::new(CommandVcs::subversion()))
      .with("svn", || Box::new(CommandVcs::subversion()))
      .with("bazaar", || Box::new(CommandVcs::bazaar()))
      .with("bzr", || Box::new(CommandVcs::bazaar()))
  }

  pub fn with(mut self, name: impl Into<String>, constructor: VcsConstructor) -> Self {
    self.entries.insert(name.into(), constructor);
    self
  }

  /// Exact-match lookup.
  pub fn named(&self, name: &str) -> Option<VcsConstructor> {
    self.entries.get(name).copied()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }
}
