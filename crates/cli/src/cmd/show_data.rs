//! Show-data command implementation.
//!
//! Loads the project and lists its data sources, items and layouts.

use anyhow::Result;

use quire_lib::entity::Document;
use quire_lib::runner::CommandRunner;

use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols};

pub fn cmd_show_data(runner: &mut CommandRunner, format: OutputFormat) -> Result<()> {
  let project = runner.load_project()?;

  if format.is_json() {
    let sources: Vec<_> = project
      .data_sources()
      .iter()
      .map(|source| {
        serde_json::json!({
          "type": source.kind(),
          "vcs": source.vcs_aware().map(|aware| aware.vcs().name()),
        })
      })
      .collect();
    print_json(&serde_json::json!({
      "root": project.root(),
      "data_sources": sources,
      "items": project.items(),
      "layouts": project.layouts(),
    }))?;
    return Ok(());
  }

  println!("Data sources:");
  for source in project.data_sources() {
    match source.vcs_aware() {
      Some(aware) => println!("  {} {} (vcs: {})", symbols::INFO, source.kind(), aware.vcs().name()),
      None => println!("  {} {}", symbols::INFO, source.kind()),
    }
  }

  if project.items().is_empty() && project.layouts().is_empty() {
    println!();
    print_info("No items or layouts found.");
    return Ok(());
  }

  for (heading, documents) in [
    ("Items", project.items().iter().map(|i| i as &dyn Document).collect::<Vec<_>>()),
    ("Layouts", project.layouts().iter().map(|l| l as &dyn Document).collect()),
  ] {
    if documents.is_empty() {
      continue;
    }
    println!();
    println!("{}:", heading);
    for document in documents {
      println!("  {} {}", symbols::INFO, document.identifier());
      for (key, value) in document.attributes() {
        print_stat(&format!("  {}", key), &display_value(value));
      }
    }
  }

  Ok(())
}

fn display_value(value: &serde_json::Value) -> String {
  match value {
    serde_json::Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}
