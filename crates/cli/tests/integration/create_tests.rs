//! Create-item and create-layout integration tests.

use predicates::prelude::*;

use super::common::TestProject;

// =============================================================================
// Success paths
// =============================================================================

#[test]
fn create_item_writes_front_matter() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .args(["create-item", "/about", "-a", "title=About us", "-a", "draft=true", "--content", "Hello"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created item /about"));

  assert_eq!(
    project.read_file("content/about.html"),
    "---\ndraft: true\ntitle: About us\n---\nHello"
  );
}

#[test]
fn content_resembling_front_matter_is_kept_verbatim() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .args(["create-item", "/x", "--content", "---\ndraft: true\n---\nbody"])
    .assert()
    .success();

  let output = project.quire_cmd().args(["show-data", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let item = json["items"]
    .as_array()
    .unwrap()
    .iter()
    .find(|item| item["identifier"] == "/x")
    .unwrap()
    .clone();
  assert_eq!(item["content"], "---\ndraft: true\n---\nbody");
  assert!(item["attributes"]["draft"].is_null());
}

#[test]
fn item_outside_configured_root_is_user_error() {
  let project = TestProject::with_config("data_sources:\n  - type: filesystem\n    items_root: /blog/\n");

  project
    .quire_cmd()
    .args(["create-item", "/blogpost"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("outside /blog/"));

  assert!(!project.file("content/post.html").exists());
}

#[test]
fn create_item_adds_leading_slash() {
  let project = TestProject::new();

  project.quire_cmd().args(["create-item", "notes/first"]).assert().success();

  assert!(project.file("content/notes/first.html").is_file());
}

#[test]
fn create_layout_uses_layouts_dir() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .args(["create-layout", "/default", "--content", "<html></html>"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created layout /default"));

  assert!(project.file("layouts/default.html").is_file());
  assert!(!project.file("content").exists());
}

#[test]
fn create_item_with_noop_vcs() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .args(["create-item", "/page", "--vcs", "noop"])
    .assert()
    .success();

  assert!(project.file("content/page.html").is_file());
}

#[test]
fn configured_content_dir_is_used() {
  let project = TestProject::with_config("data_sources:\n  - type: filesystem\n    content_dir: pages\n");

  project.quire_cmd().args(["create-item", "/page"]).assert().success();

  assert!(project.file("pages/page.html").is_file());
}

// =============================================================================
// User errors
// =============================================================================

#[test]
fn existing_item_is_user_error() {
  let project = TestProject::new();
  project.write_file("content/about.md", "old");

  project
    .quire_cmd()
    .args(["create-item", "/about"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("/about"))
    .stderr(predicate::str::contains("Build stack").not());

  assert_eq!(project.read_file("content/about.md"), "old");
  assert!(!project.file("content/about.html").exists());
}

#[test]
fn unknown_vcs_flag_is_user_error() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .args(["create-item", "/page", "--vcs", "cvs"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("A VCS named cvs was not found"));

  assert!(!project.file("content/page.html").exists());
}

#[test]
fn unknown_vcs_in_config_is_user_error() {
  let project = TestProject::with_config("vcs: darcs\n");

  project
    .quire_cmd()
    .args(["create-item", "/page"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("A VCS named darcs was not found"));
}

#[test]
fn unknown_vcs_from_env_is_user_error() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .env("QUIRE_VCS", "darcs")
    .args(["create-item", "/page"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("A VCS named darcs was not found"));
}

#[test]
fn vcs_flag_overrides_env() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .env("QUIRE_VCS", "darcs")
    .args(["create-item", "/page", "--vcs", "noop"])
    .assert()
    .success();
}

#[test]
fn malformed_attribute_is_user_error() {
  let project = TestProject::new();

  project
    .quire_cmd()
    .args(["create-item", "/page", "-a", "novalue"])
    .assert()
    .code(1);

  assert!(!project.file("content/page.html").exists());
}

#[test]
fn unknown_data_source_type_is_user_error() {
  let project = TestProject::with_config("data_sources:\n  - type: database\n");

  project
    .quire_cmd()
    .args(["create-item", "/page"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("database"));
}

// =============================================================================
// Fatal errors
// =============================================================================

#[test]
fn write_failure_is_fatal_with_stack() {
  let project = TestProject::new();
  project.write_file("content", "not a directory");

  project
    .quire_cmd()
    .args(["create-item", "/notes/new"])
    .assert()
    .code(2)
    .stderr(predicate::str::contains("Build stack"))
    .stderr(predicate::str::contains("item /notes/new"));
}
