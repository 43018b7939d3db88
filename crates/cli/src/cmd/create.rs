//! Create-item and create-layout command implementations.

use anyhow::Result;
use clap::Args;

use quire_lib::attributes::{AttributeValue, parse_assignment};
use quire_lib::entity::{Item, Layout, MutableItemView, MutableLayoutView};
use quire_lib::project::StackFrame;
use quire_lib::runner::CommandRunner;

use crate::output::print_success;

#[derive(Debug, Args)]
pub struct CreateArgs {
  /// Identifier of the new entity, such as /about
  pub identifier: String,

  /// Attribute to set on the new entity (repeatable)
  #[arg(short = 'a', long = "attribute", value_name = "KEY=VALUE")]
  pub attributes: Vec<String>,

  /// Initial content
  #[arg(long, default_value = "", allow_hyphen_values = true)]
  pub content: String,

  /// VCS backend used to register the new file
  #[arg(long, value_name = "NAME")]
  pub vcs: Option<String>,
}

pub fn cmd_create_item(runner: &mut CommandRunner, args: &CreateArgs) -> Result<()> {
  let identifier = normalize_identifier(&args.identifier);
  let attributes = parse_attributes(&args.attributes)?;
  prepare_project(runner, args.vcs.as_deref())?;

  let mut item = Item::new(identifier.clone(), args.content.clone());
  MutableItemView::new(&mut item).update_attributes(attributes);

  let project = runner.load_project()?;
  project.push_frame(StackFrame::Item {
    identifier: identifier.clone(),
  });
  let path = project.create_item(item)?;
  project.pop_frame();

  print_success(&format!("Created item {} at {}", identifier, path.display()));
  Ok(())
}

pub fn cmd_create_layout(runner: &mut CommandRunner, args: &CreateArgs) -> Result<()> {
  let identifier = normalize_identifier(&args.identifier);
  let attributes = parse_attributes(&args.attributes)?;
  prepare_project(runner, args.vcs.as_deref())?;

  let mut layout = Layout::new(identifier.clone(), args.content.clone());
  MutableLayoutView::new(&mut layout).update_attributes(attributes);

  let project = runner.load_project()?;
  project.push_frame(StackFrame::Layout {
    identifier: identifier.clone(),
  });
  let path = project.create_layout(layout)?;
  project.pop_frame();

  print_success(&format!("Created layout {} at {}", identifier, path.display()));
  Ok(())
}

/// Load the project, then install the VCS backend picked from the command
/// line, the project configuration or `QUIRE_VCS`, in that order.
fn prepare_project(runner: &mut CommandRunner, requested: Option<&str>) -> Result<()> {
  let configured = runner.load_project()?.config().vcs.clone();
  let vcs = requested
    .map(str::to_string)
    .or(configured)
    .or_else(|| runner.options().default_vcs.clone());
  runner.configure_vcs(vcs.as_deref())?;
  Ok(())
}

fn parse_attributes(assignments: &[String]) -> Result<Vec<(String, AttributeValue)>> {
  let attributes = assignments
    .iter()
    .map(|assignment| parse_assignment(assignment))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(attributes)
}

fn normalize_identifier(identifier: &str) -> String {
  if identifier.starts_with('/') {
    identifier.to_string()
  } else {
    format!("/{}", identifier)
  }
}
