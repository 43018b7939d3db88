//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated project directory.
///
/// Each test gets its own temporary directory with a `quire.yaml` marker.
pub struct TestProject {
  pub temp: TempDir,
}

impl TestProject {
  /// Create a project with the given `quire.yaml` content.
  pub fn with_config(config: &str) -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("quire.yaml"), config).unwrap();
    Self { temp }
  }

  /// Create a project with an empty configuration.
  pub fn new() -> Self {
    Self::with_config("")
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.file(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
  }

  pub fn file(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  /// Get a Command for the quire binary running inside this project.
  ///
  /// `QUIRE_VCS` and `RUST_LOG` are cleared so the host environment does not
  /// leak into the test.
  pub fn quire_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("quire");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("QUIRE_VCS");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
