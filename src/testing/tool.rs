//! Tool under test
//!
//! The runner only ever sees the [`ToolInvoker`] trait, so it can be driven
//! by a fake in tests. [`ProcessTool`] is the real thing: one child process
//! per call, awaited to completion.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use crate::common::{Error, Result};

/// What one invocation of the tool produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Exit code, `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Captured stderr, only when capturing is enabled
    pub stderr: Option<String>,
}

impl Invocation {
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            stderr: None,
        }
    }
}

/// Capability to run the tool under test once
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Run the tool with `args` and wait for it to terminate
    async fn invoke(&self, args: &[OsString]) -> Result<Invocation>;

    /// Program name, for display
    fn program(&self) -> &Path;
}

/// Runs the tool as a child process
#[derive(Debug, Clone)]
pub struct ProcessTool {
    program: PathBuf,
    working_dir: PathBuf,
    capture_stderr: bool,
}

impl ProcessTool {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
            capture_stderr: false,
        }
    }

    /// Pipe stderr instead of inheriting it
    pub fn capture_stderr(mut self, capture: bool) -> Self {
        self.capture_stderr = capture;
        self
    }

    fn command(&self, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(if self.capture_stderr {
                Stdio::piped()
            } else {
                Stdio::inherit()
            })
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> Error {
        Error::ToolSpawn {
            tool: self.program.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl ToolInvoker for ProcessTool {
    async fn invoke(&self, args: &[OsString]) -> Result<Invocation> {
        let mut cmd = self.command(args);

        if self.capture_stderr {
            // `output()` would re-pipe stdout; spawn keeps it on /dev/null.
            let child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
            let output = child.wait_with_output().await?;
            Ok(Invocation {
                exit_code: exit_code(output.status),
                stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
            })
        } else {
            let status = cmd.status().await.map_err(|e| self.spawn_error(e))?;
            Ok(Invocation {
                exit_code: exit_code(status),
                stderr: None,
            })
        }
    }

    fn program(&self) -> &Path {
        &self.program
    }
}

fn exit_code(status: ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            tracing::warn!(signal, "tool terminated by signal");
        }
    }
    status.code()
}

/// Render a command line for display
pub fn format_command(program: &Path, args: &[OsString]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}
