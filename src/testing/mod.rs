//! Conformance test runner
//!
//! Runs declared scenarios against the padring binary and judges each one
//! purely on the tool's exit status. The generated geometry is never read.

mod config;
pub mod registry;
pub mod report;
mod runner;
pub mod tool;

pub use config::*;
pub use registry::{builtin_suite, Outputs, Scenario, Suite};
pub use report::Reporter;
pub use runner::{run_suite, RunSummary, Verdict};
pub use tool::{Invocation, ProcessTool, ToolInvoker};
