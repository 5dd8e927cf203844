use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "restbench",
    version,
    about = "Declarative REST API benchmarking with dependency-ordered endpoints."
)]
pub struct Cli {
    /// Enable debug-level logging.
    #[arg(short, long, global = true, env = "RESTBENCH_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the benchmark described by a config file.
    Run(RunArgs),
    /// Write an example config file to get started.
    Init(InitArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to the benchmark config (.toml or .json).
    pub config: PathBuf,

    /// Override the global concurrency limit.
    #[arg(long)]
    pub concurrent: Option<usize>,

    /// Override the global request count per endpoint.
    #[arg(long)]
    pub max_requests: Option<u64>,

    /// Run each endpoint for this long (milliseconds) instead of a fixed
    /// request count.
    #[arg(long, value_name = "MS")]
    pub duration: Option<u64>,

    /// Write the full report as JSON.
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Write per-endpoint stats as CSV.
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Suppress progress events and the final summary.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the example config.
    #[arg(default_value = "restbench.toml")]
    pub path: PathBuf,
}
