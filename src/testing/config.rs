//! Suite file configuration types
//!
//! Defines the data structures for deserializing YAML suite files.
//!
//! ```yaml
//! name: corners
//! library: iocells.lef
//! outputs:
//!   svg: padring.svg
//!   gds: padring.gds
//! scenarios:
//!   - config: threecorners.config
//!     expect: 0
//!   - config: nonsquarecorners.config
//!     lef: nonsquarecorners.lef
//!     expect: 0
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

use super::registry::{Outputs, Scenario, Suite, DEFAULT_GDS, DEFAULT_LIBRARY};

/// A complete suite loaded from a YAML file
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct SuiteFile {
    /// Name of the suite
    pub name: String,
    /// Optional description of what the suite covers
    pub description: Option<String>,
    /// Library for scenarios that do not name one
    #[serde(default = "default_library")]
    pub library: String,
    /// Output destinations shared by every scenario
    #[serde(default)]
    pub outputs: OutputsConfig,
    /// The scenarios, in execution order
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

/// Output destinations
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct OutputsConfig {
    pub svg: Option<PathBuf>,
    pub def: Option<PathBuf>,
    #[serde(default = "default_gds")]
    pub gds: PathBuf,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            svg: None,
            def: None,
            gds: default_gds(),
        }
    }
}

/// A single scenario entry
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Configuration file identifier
    pub config: String,
    /// Cell library override
    pub lef: Option<String>,
    /// Expected exit code
    pub expect: i64,
}

fn default_library() -> String {
    DEFAULT_LIBRARY.to_string()
}

fn default_gds() -> PathBuf {
    PathBuf::from(DEFAULT_GDS)
}

impl SuiteFile {
    /// Read and validate a suite file
    pub fn load(path: &Path) -> Result<Suite> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse and validate suite YAML; `origin` names the source in errors
    pub fn parse(content: &str, origin: &str) -> Result<Suite> {
        let file: SuiteFile =
            serde_yaml::from_str(content).map_err(|e| Error::suite_invalid(origin, e.to_string()))?;
        file.into_suite(origin)
    }

    fn into_suite(self, origin: &str) -> Result<Suite> {
        if self.name.trim().is_empty() {
            return Err(Error::suite_invalid(origin, "suite name is empty"));
        }
        if self.library.trim().is_empty() {
            return Err(Error::suite_invalid(origin, "default library is empty"));
        }

        let mut scenarios = Vec::with_capacity(self.scenarios.len());
        for (i, entry) in self.scenarios.into_iter().enumerate() {
            let index = i + 1;
            if entry.config.trim().is_empty() {
                return Err(Error::suite_invalid(
                    origin,
                    format!("scenario {} has an empty config", index),
                ));
            }
            if entry.lef.as_deref().is_some_and(|lef| lef.trim().is_empty()) {
                return Err(Error::suite_invalid(
                    origin,
                    format!("scenario {} ('{}') has an empty lef", index, entry.config),
                ));
            }
            let expected = u8::try_from(entry.expect).map_err(|_| {
                Error::suite_invalid(
                    origin,
                    format!(
                        "scenario {} ('{}') expects exit code {}, must be 0..=255",
                        index, entry.config, entry.expect
                    ),
                )
            })?;

            let mut scenario = Scenario::new(entry.config, i32::from(expected));
            if let Some(lef) = entry.lef {
                scenario = scenario.with_library(lef);
            }
            scenarios.push(scenario);
        }

        let outputs = Outputs {
            svg: self.outputs.svg,
            def: self.outputs.def,
            gds: self.outputs.gds,
        };

        let mut suite = Suite::new(self.name, outputs, scenarios).with_default_library(self.library);
        if let Some(description) = self.description {
            suite = suite.with_description(description);
        }
        Ok(suite)
    }
}
