//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};

/// Default tool binary name, looked up on PATH
pub const DEFAULT_TOOL: &str = "padring";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Tool under test
    #[serde(default)]
    pub tool: ToolConfig,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Where to find the tool under test
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ToolConfig {
    /// Path or bare binary name; bare names are searched on PATH
    pub path: Option<PathBuf>,
}

/// Default settings
#[derive(Debug, Deserialize)]
pub struct Defaults {
    /// Built-in suite to run when none is named on the command line
    #[serde(default = "default_suite")]
    pub suite: String,

    /// Directory holding the config/LEF fixtures; the tool runs from here.
    /// Unset means the current directory.
    pub fixtures_dir: Option<PathBuf>,

    /// Always exit 0 after a completed run, regardless of failures
    #[serde(default)]
    pub report_only: bool,

    /// Pipe the tool's stderr and show it only for failing scenarios
    #[serde(default)]
    pub capture_stderr: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            suite: default_suite(),
            fixtures_dir: None,
            report_only: false,
            capture_stderr: false,
        }
    }
}

fn default_suite() -> String {
    "svg".to_string()
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present, and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config = Self::from_toml(&content)?;
        Ok(match path.parent() {
            Some(base) => config.relative_to(base),
            None => config,
        })
    }

    /// Anchor relative paths from the file at `base`
    ///
    /// Bare tool names are left alone so they are still searched on PATH.
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.tool.path = self.tool.path.take().map(|tool| {
            if tool.is_relative() && tool.components().count() > 1 {
                base.join(tool)
            } else {
                tool
            }
        });
        self.defaults.fixtures_dir = self.defaults.fixtures_dir.take().map(|dir| {
            if dir.is_relative() {
                base.join(dir)
            } else {
                dir
            }
        });
        self
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Resolve the tool binary to an absolute path
    ///
    /// `overridden` (from the command line) wins over the config file. A
    /// command-line path is taken relative to the current directory; bare
    /// names are searched on PATH.
    pub fn resolve_tool(&self, overridden: Option<&Path>) -> Result<PathBuf> {
        let requested = overridden
            .map(Path::to_path_buf)
            .or_else(|| self.tool.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL));

        resolve_program(&requested)
    }
}

/// Turn a user-supplied program into something a child process can be
/// started from, independent of the child's working directory.
pub fn resolve_program(requested: &Path) -> Result<PathBuf> {
    let name = requested.display().to_string();

    if requested.components().count() > 1 || requested.is_absolute() {
        return requested
            .canonicalize()
            .map_err(|_| Error::tool_not_found(&name, &[name.as_str()]));
    }

    which::which(requested).map_err(|_| Error::tool_not_found(&name, &["PATH"]))
}
