//! CLI command handling
//!
//! Resolves configuration into a suite and a tool, runs it, and maps the
//! outcome to the harness's exit status.

use colored::Colorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::commands::{ColorChoice, Commands, SuiteSelection};
use crate::common::config::{Config, DEFAULT_TOOL};
use crate::common::{Error, Result};
use crate::testing::registry::{all_suites, builtin_suite, suite_names};
use crate::testing::report::COLUMN_WIDTH;
use crate::testing::tool::format_command;
use crate::testing::{run_suite, ProcessTool, Reporter, Suite, SuiteFile};

/// Every scenario passed, or `--report-only` was given
pub const EXIT_OK: i32 = 0;
/// At least one scenario failed
pub const EXIT_FAILURES: i32 = 1;
/// The harness itself could not run
pub const EXIT_ERROR: i32 = 2;

/// Dispatch a CLI command, returning the process exit status
pub async fn dispatch(command: Commands, config: &Config) -> Result<i32> {
    match command {
        Commands::Run {
            suite,
            tool,
            fixtures,
            capture_stderr,
            report_only,
            color,
        } => {
            let selected = select_suite(&suite, config)?;
            let fixtures_dir = fixtures_dir(fixtures, &suite, config);
            check_fixtures_dir(&fixtures_dir)?;

            let program = config.resolve_tool(tool.as_deref())?;
            let capture_stderr = capture_stderr || config.defaults.capture_stderr;
            let report_only = report_only || config.defaults.report_only;

            tracing::info!(
                suite = %selected,
                tool = %program.display(),
                fixtures = %fixtures_dir.display(),
                "starting run"
            );

            let tool = ProcessTool::new(program, fixtures_dir).capture_stderr(capture_stderr);
            let mut reporter = Reporter::stdio(use_color(color));
            let summary = run_suite(&selected, &tool, &mut reporter).await?;

            if summary.all_passed() || report_only {
                Ok(EXIT_OK)
            } else {
                Ok(EXIT_FAILURES)
            }
        }

        Commands::List { suite } => {
            let selected = select_suite(&suite, config)?;
            let program = config
                .tool
                .path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL));

            print!("{}", render_listing(&selected, &program));
            Ok(EXIT_OK)
        }

        Commands::Suites => {
            for info in all_suites() {
                println!(
                    "{}{} ({} scenarios)",
                    format!("{:<8}", info.name).bold(),
                    info.description,
                    info.scenarios.len()
                );
            }
            Ok(EXIT_OK)
        }
    }
}

/// Pick the suite: a suite file, a named built-in, or the configured default
pub fn select_suite(selection: &SuiteSelection, config: &Config) -> Result<Suite> {
    if let Some(path) = &selection.suite_file {
        return SuiteFile::load(path);
    }

    let name = selection
        .suite
        .as_deref()
        .unwrap_or(config.defaults.suite.as_str());
    builtin_suite(name).ok_or_else(|| Error::unknown_suite(name, &suite_names()))
}

/// `--fixtures`, else the suite file's directory, else the configured default
pub fn fixtures_dir(
    explicit: Option<PathBuf>,
    selection: &SuiteSelection,
    config: &Config,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }

    let suite_dir = selection
        .suite_file
        .as_deref()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty());

    match suite_dir {
        Some(dir) => dir.to_path_buf(),
        None if selection.suite_file.is_some() => PathBuf::from("."),
        None => config
            .defaults
            .fixtures_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

/// The fixtures path must name an existing directory
pub fn check_fixtures_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(Error::FixturesMissing(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(Error::Config(format!(
            "fixtures path '{}' is not a directory",
            dir.display()
        )));
    }
    Ok(())
}

/// Text for `list`: one row per scenario with its expected code and command
pub fn render_listing(suite: &Suite, program: &Path) -> String {
    let mut out = String::new();

    out.push_str(&format!("Suite: {}", suite.name));
    if let Some(description) = &suite.description {
        out.push_str(&format!(" - {}", description));
    }
    out.push('\n');

    for scenario in suite.scenarios() {
        let args = suite.command_args(scenario);
        out.push_str(&format!(
            "{:<width$}expect {:<4}{}\n",
            scenario.config,
            scenario.expected_exit_code,
            format_command(program, &args),
            width = COLUMN_WIDTH
        ));
    }
    out
}

fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => {
            colored::control::set_override(true);
            true
        }
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    }
}
