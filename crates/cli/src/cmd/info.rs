use anyhow::Result;

use quire_lib::data_source::DataSourceRegistry;
use quire_lib::runner::CommandRunner;

use crate::output::{OutputFormat, print_json, print_stat, symbols};

pub fn cmd_info(runner: &mut CommandRunner, format: OutputFormat) -> Result<()> {
  let cwd = runner.options().cwd.clone();
  let in_project = runner.in_project_dir();
  let default_vcs = runner.options().default_vcs.clone();
  let vcs_backends: Vec<String> = runner.vcs_registry().names().map(str::to_string).collect();
  let data_source_types: Vec<String> = DataSourceRegistry::builtin().names().map(str::to_string).collect();

  if format.is_json() {
    print_json(&serde_json::json!({
      "directory": cwd,
      "in_project": in_project,
      "default_vcs": default_vcs,
      "vcs_backends": vcs_backends,
      "data_source_types": data_source_types,
    }))?;
    return Ok(());
  }

  println!("Environment:");
  print_stat("Directory", &cwd.display().to_string());
  print_stat("Project", if in_project { "yes" } else { "no" });
  print_stat("Default VCS", default_vcs.as_deref().unwrap_or("(none)"));

  println!();
  println!("VCS backends:");
  for name in &vcs_backends {
    println!("  {} {}", symbols::INFO, name);
  }

  println!();
  println!("Data source types:");
  for name in &data_source_types {
    println!("  {} {}", symbols::INFO, name);
  }

  Ok(())
}
