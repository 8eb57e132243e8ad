//! padring-harness - conformance tests for the padring generator
//!
//! This library holds the scenario registry, the runner that invokes the
//! tool under test, and the console reporter.

pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{run_suite, RunSummary, Scenario, Suite, ToolInvoker, Verdict};
