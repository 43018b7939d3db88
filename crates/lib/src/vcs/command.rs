use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::{Vcs, VcsError};

/// Backend that only touches the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVcs;

impl Vcs for NoopVcs {
  fn name(&self) -> &str {
    "noop"
  }

  fn add(&self, _path: &Path) -> Result<(), VcsError> {
    Ok(())
  }

  fn remove(&self, path: &Path) -> Result<(), VcsError> {
    let result = if path.is_dir() {
      fs::remove_dir_all(path)
    } else {
      fs::remove_file(path)
    };
    result.map_err(|source| VcsError::Io {
      path: path.to_path_buf(),
      source,
    })
  }

  fn rename(&self, src: &Path, dst: &Path) -> Result<(), VcsError> {
    if let Some(parent) = dst.parent() {
      fs::create_dir_all(parent).map_err(|source| VcsError::Io {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    fs::rename(src, dst).map_err(|source| VcsError::Io {
      path: src.to_path_buf(),
      source,
    })
  }
}

/// Backend driving a version-control command line tool.
///
/// All supported tools share the `add`, `rm` and `mv` subcommands.
#[derive(Debug, Clone)]
pub struct CommandVcs {
  name: &'static str,
  program: &'static str,
}

impl CommandVcs {
  pub fn new(name: &'static str, program: &'static str) -> Self {
    Self { name, program }
  }

  pub fn git() -> Self {
    Self::new("git", "git")
  }

  pub fn mercurial() -> Self {
    Self::new("mercurial", "hg")
  }

  pub fn subversion() -> Self {
    Self::new("subversion", "svn")
  }

  pub fn bazaar() -> Self {
    Self::new("bazaar", "bzr")
  }

  pub fn program(&self) -> &str {
    self.program
  }

  fn run(&self, subcommand: &str, paths: &[&Path]) -> Result<(), VcsError> {
    let mut command = Command::new(self.program);
    command.arg(subcommand).args(paths.iter().map(|p| p.as_os_str()));

    // Run from the file's directory so the tool finds the enclosing repository.
    if let Some(dir) = paths.first().and_then(|p| p.parent()).filter(|d| d.is_dir()) {
      command.current_dir(dir);
    }

    debug!(
      program = %self.program,
      subcommand = %subcommand,
      paths = ?paths.iter().map(|p| p.as_os_str()).collect::<Vec<&OsStr>>(),
      "running vcs command"
    );

    let output = command.output().map_err(|source| VcsError::Spawn {
      program: self.program.to_string(),
      source,
    })?;

    if !output.status.success() {
      return Err(VcsError::CommandFailed {
        program: self.program.to_string(),
        subcommand: subcommand.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    Ok(())
  }
}

impl Vcs for CommandVcs {
  fn name(&self) -> &str {
    self.name
  }

  fn add(&self, path: &Path) -> Result<(), VcsError> {
    self.run("add", &[path])
  }

  fn remove(&self, path: &Path) -> Result<(), VcsError> {
    self.run("rm", &[path])
  }

  fn rename(&self, src: &Path, dst: &Path) -> Result<(), VcsError> {
    self.run("mv", &[src, dst])
  }
}
