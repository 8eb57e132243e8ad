//! CLI command definitions
//!
//! Defines the clap commands for the padring harness.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a suite against the padring binary
    Run {
        #[command(flatten)]
        suite: SuiteSelection,

        /// Path to the padring binary (default: from config, else `padring` on PATH)
        #[arg(long)]
        tool: Option<PathBuf>,

        /// Directory holding the fixtures; the tool is run from here
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Capture the tool's stderr and show it only for failing scenarios
        #[arg(long)]
        capture_stderr: bool,

        /// Always exit 0 once the suite has run, even with failures
        #[arg(long)]
        report_only: bool,

        /// When to color verdicts
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Show the scenarios of a suite and the command line each would run
    List {
        #[command(flatten)]
        suite: SuiteSelection,
    },

    /// List the built-in suites
    Suites,
}

/// Which suite to use
#[derive(Args, Debug, Clone, Default)]
pub struct SuiteSelection {
    /// Built-in suite name (see `suites`)
    #[arg(long, conflicts_with = "suite_file")]
    pub suite: Option<String>,

    /// YAML suite file
    #[arg(long)]
    pub suite_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}
