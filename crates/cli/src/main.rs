//! manisync: idempotent manifest metadata synchronizer.
//!
//! Reads an update plan (relative document path to desired metadata) and
//! brings every manifest document under a root directory in line with it,
//! rewriting only the documents that drifted.

mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Synchronize metadata fields across deployment manifest documents.
#[derive(Parser)]
#[command(name = "manisync")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Apply an update plan, rewriting documents that drifted
  Apply {
    /// Path to the plan file
    #[arg(default_value = "plan.json")]
    plan: PathBuf,

    /// Directory the plan's document paths resolve against
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
  },

  /// Show what apply would change, without writing anything
  Plan {
    /// Path to the plan file
    #[arg(default_value = "plan.json")]
    plan: PathBuf,

    /// Directory the plan's document paths resolve against
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
  },

  /// Write a starter plan file
  Init {
    /// Directory to place plan.json in
    #[arg(default_value = ".")]
    dir: PathBuf,
  },
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Apply { plan, root, json } => cmd::cmd_apply(&plan, &root, json),
    Commands::Plan { plan, root, json } => cmd::cmd_plan(&plan, &root, json),
    Commands::Init { dir } => cmd::cmd_init(&dir),
  };

  if let Err(err) = result {
    output::print_error(&format!("{err:#}"));
    std::process::exit(1);
  }
}
