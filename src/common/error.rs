//! Error types for the padring harness
//!
//! These are harness-level failures: the run cannot start or cannot
//! continue. A scenario whose tool invocation misbehaves is never an
//! `Error`; it is recorded as a FAIL verdict instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Tool Errors ===
    #[error("Tool under test '{name}' not found. Searched: {searched}")]
    ToolNotFound { name: String, searched: String },

    #[error("Failed to spawn '{tool}': {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Fixtures directory '{}' does not exist", .0.display())]
    FixturesMissing(PathBuf),

    // === Suite Errors ===
    #[error("Unknown suite '{name}'. Available: {available}")]
    UnknownSuite { name: String, available: String },

    #[error("Invalid suite file '{path}': {reason}")]
    SuiteInvalid { path: String, reason: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a tool not found error with the locations that were tried
    pub fn tool_not_found<S: AsRef<str>>(name: &str, searched: &[S]) -> Self {
        Self::ToolNotFound {
            name: name.to_string(),
            searched: searched
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create an unknown suite error listing the built-in names
    pub fn unknown_suite(name: &str, available: &[&str]) -> Self {
        Self::UnknownSuite {
            name: name.to_string(),
            available: available.join(", "),
        }
    }

    /// Create a suite validation error
    pub fn suite_invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::SuiteInvalid {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
