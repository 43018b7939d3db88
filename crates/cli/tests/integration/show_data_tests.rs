//! Show-data command integration tests.

use predicates::prelude::*;

use super::common::TestProject;

#[test]
fn show_data_lists_items_and_layouts() {
  let project = TestProject::new();
  project.write_file("content/about.md", "---\ntitle: About\n---\nHi\n");
  project.write_file("layouts/default.html", "<html></html>");

  project
    .quire_cmd()
    .arg("show-data")
    .assert()
    .success()
    .stdout(predicate::str::contains("filesystem (vcs: noop)"))
    .stdout(predicate::str::contains("/about"))
    .stdout(predicate::str::contains("About"))
    .stdout(predicate::str::contains("/default"));
}

#[test]
fn show_data_empty_project() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .arg("show-data")
    .assert()
    .success()
    .stdout(predicate::str::contains("No items or layouts found"));
}

#[test]
fn show_data_json_output() {
  let project = TestProject::with_config("data_sources:\n  - type: filesystem\n  - type: static\n");
  project.write_file("content/about.md", "---\ntitle: About\n---\nHi\n");
  project.write_file("static/logo.png", "png");

  let output = project.quire_cmd().args(["show-data", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let sources = json["data_sources"].as_array().unwrap();
  assert_eq!(sources.len(), 2);
  assert_eq!(sources[0]["type"], "filesystem");
  assert_eq!(sources[0]["vcs"], "noop");
  assert_eq!(sources[1]["type"], "static");
  assert!(sources[1]["vcs"].is_null());

  let items = json["items"].as_array().unwrap();
  assert!(items.iter().any(|item| item["identifier"] == "/about" && item["attributes"]["title"] == "About"));
  assert!(items.iter().any(|item| item["identifier"] == "/logo.png"));
}

#[test]
fn show_data_with_directory_flag() {
  let project = TestProject::new();
  project.write_file("content/about.md", "Hi");

  let mut cmd = project.quire_cmd();
  cmd.current_dir(std::env::temp_dir());
  cmd
    .arg("-C")
    .arg(project.path())
    .arg("show-data")
    .assert()
    .success()
    .stdout(predicate::str::contains("/about"));
}

#[test]
fn invalid_config_is_user_error() {
  let project = TestProject::with_config("data_sources: [unclosed\n");

  project.quire_cmd().arg("show-data").assert().code(1);
}
