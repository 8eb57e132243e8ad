//! Console report
//!
//! One line per scenario: the config identifier padded to [`COLUMN_WIDTH`],
//! then the verdict token. Identifiers at or past the column get no padding.
//! A blank line and `Failed tests: <n>` close the report.

use colored::Colorize;
use std::io::{self, Stderr, Stdout, Write};

use super::runner::Verdict;

/// Column at which the verdict token starts
pub const COLUMN_WIDTH: usize = 30;

/// Identifier padded out to the verdict column
fn padded(config: &str) -> String {
    format!("{:<width$}", config, width = COLUMN_WIDTH)
}

/// Plain-text verdict line
pub fn verdict_line(config: &str, verdict: Verdict) -> String {
    format!("{}{}", padded(config), verdict.token())
}

/// Plain-text closing line
pub fn summary_line(failed: usize) -> String {
    format!("Failed tests: {}", failed)
}

/// Writes the report to `out` and diagnostics to `err`
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    color: bool,
}

impl Reporter<Stdout, Stderr> {
    /// Report on stdout, diagnostics on stderr
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), color)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, color: bool) -> Self {
        Self { out, err, color }
    }

    pub fn scenario(&mut self, config: &str, verdict: Verdict) -> io::Result<()> {
        if self.color {
            let token = match verdict {
                Verdict::Pass => verdict.token().green(),
                Verdict::Fail => verdict.token().red().bold(),
            };
            writeln!(self.out, "{}{}", padded(config), token)?;
        } else {
            writeln!(self.out, "{}", verdict_line(config, verdict))?;
        }
        self.out.flush()
    }

    /// Echo a failing scenario's captured stderr, indented
    pub fn captured_stderr(&mut self, config: &str, stderr: &str) -> io::Result<()> {
        if stderr.trim().is_empty() {
            return Ok(());
        }
        writeln!(self.err, "--- stderr from {} ---", config)?;
        for line in stderr.lines() {
            writeln!(self.err, "    {}", line)?;
        }
        self.err.flush()
    }

    pub fn summary(&mut self, failed: usize) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", summary_line(failed))?;
        self.out.flush()
    }

    /// Give back the sinks
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
