//! padring-harness - conformance tests for the padring generator
//!
//! Runs each scenario of a suite against the padring binary and reports
//! whether the tool's exit status matched the expectation.

use clap::Parser;
use padring_harness::cli::{self, EXIT_ERROR};
use padring_harness::commands::Commands;
use padring_harness::common::{config::Config, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "padring-harness", about = "Conformance test harness for padring")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: per-user config.toml, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    let result = match Config::load(cli.config.as_deref()) {
        Ok(config) => cli::dispatch(cli.command, &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(EXIT_ERROR);
        }
    }
}
