mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quire_lib::runner::{CommandRunner, RunnerOptions};

use crate::cmd::CreateArgs;
use crate::output::OutputFormat;

/// quire - static content build tool
#[derive(Parser)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Show error causes for user-facing errors too
  #[arg(long, global = true)]
  debug: bool,

  /// Run as if quire was started in DIR
  #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
  directory: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show available VCS backends and data source types
  Info {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show the project's data sources, items and layouts
  ShowData {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Create a new item in the project
  CreateItem(CreateArgs),

  /// Create a new layout in the project
  CreateLayout(CreateArgs),
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let cwd = cli
    .directory
    .clone()
    .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
  let mut runner = CommandRunner::new(RunnerOptions::from_env(cwd));

  let outcome = runner.call(|runner| match &cli.command {
    Commands::Info { format } => cmd::cmd_info(runner, *format),
    Commands::ShowData { format } => cmd::cmd_show_data(runner, *format),
    Commands::CreateItem(args) => cmd::cmd_create_item(runner, args),
    Commands::CreateLayout(args) => cmd::cmd_create_layout(runner, args),
  });

  if let Some(report) = outcome.report() {
    output::print_report(report, cli.debug);
  }

  ExitCode::from(outcome.exit_code())
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
