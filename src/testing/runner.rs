//! Suite runner
//!
//! Runs every scenario of a suite once, in order, against a [`ToolInvoker`]
//! and reports each verdict as soon as it is known. Nothing a scenario does
//! can stop the run; the failure count is handed back in the [`RunSummary`].

use std::io::Write;

use crate::common::Result;

use super::registry::Suite;
use super::report::Reporter;
use super::tool::{format_command, Invocation, ToolInvoker};

/// Outcome of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Exact comparison; a missing exit code never matches
    pub fn judge(expected: i32, observed: Option<i32>) -> Self {
        if observed == Some(expected) {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Report token
    pub fn token(self) -> &'static str {
        match self {
            Verdict::Pass => "OK!",
            Verdict::Fail => "*** FAIL ***",
        }
    }
}

/// Result of running a whole suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.total - self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, verdict: Verdict) {
        self.total += 1;
        if verdict == Verdict::Fail {
            self.failed += 1;
        }
    }
}

/// Run a suite
///
/// The only errors returned are failures to write the report itself.
pub async fn run_suite<T, O, E>(
    suite: &Suite,
    tool: &T,
    reporter: &mut Reporter<O, E>,
) -> Result<RunSummary>
where
    T: ToolInvoker + ?Sized,
    O: Write,
    E: Write,
{
    tracing::debug!(suite = %suite.name, scenarios = suite.scenarios().len(), "running suite");

    let mut summary = RunSummary::default();

    for scenario in suite.scenarios() {
        let args = suite.command_args(scenario);
        tracing::debug!(command = %format_command(tool.program(), &args), "invoking tool");

        let invocation = match tool.invoke(&args).await {
            Ok(invocation) => invocation,
            Err(e) => {
                tracing::warn!(config = %scenario.config, error = %e, "tool invocation failed");
                Invocation::default()
            }
        };

        let verdict = Verdict::judge(scenario.expected_exit_code, invocation.exit_code);
        tracing::debug!(
            config = %scenario.config,
            expected = scenario.expected_exit_code,
            observed = ?invocation.exit_code,
            ?verdict,
            "scenario complete"
        );

        reporter.scenario(&scenario.config, verdict)?;
        if verdict == Verdict::Fail {
            if let Some(stderr) = &invocation.stderr {
                reporter.captured_stderr(&scenario.config, stderr)?;
            }
        }

        summary.record(verdict);
    }

    reporter.summary(summary.failed)?;
    tracing::info!(
        suite = %suite.name,
        passed = summary.passed(),
        failed = summary.failed,
        "suite finished"
    );
    Ok(summary)
}
