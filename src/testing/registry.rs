//! Scenario registry
//!
//! A suite is an ordered, immutable list of scenarios plus the output
//! destinations shared by every invocation in that suite. The built-in
//! suites reproduce the fixtures shipped next to the padring sources.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Library used when a scenario does not name its own
pub const DEFAULT_LIBRARY: &str = "iocells.lef";

/// Geometry output destination used when a suite does not name one
pub const DEFAULT_GDS: &str = "padring.gds";

/// One declared test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Configuration file identifier, passed as the trailing positional argument
    pub config: String,
    /// Cell library identifier; `None` means the suite default
    pub library: Option<String>,
    /// Exit code the tool must produce for this scenario to pass
    pub expected_exit_code: i32,
}

impl Scenario {
    pub fn new(config: impl Into<String>, expected_exit_code: i32) -> Self {
        Self {
            config: config.into(),
            library: None,
            expected_exit_code,
        }
    }

    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// Library identifier to pass, falling back to `default`
    pub fn library_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.library.as_deref().unwrap_or(default)
    }
}

/// Output destinations, constant across all scenarios of a suite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    /// `--svg` destination
    pub svg: Option<PathBuf>,
    /// `--def` destination
    pub def: Option<PathBuf>,
    /// `-o` destination
    pub gds: PathBuf,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            svg: None,
            def: None,
            gds: PathBuf::from(DEFAULT_GDS),
        }
    }
}

impl Outputs {
    /// Build the argument vector:
    /// `[--svg <svg>] [--def <def>] --lef <library> -o <gds> <config>`
    pub fn args(&self, library: &str, config: &str) -> Vec<OsString> {
        let mut args = Vec::with_capacity(9);
        if let Some(svg) = &self.svg {
            args.push("--svg".into());
            args.push(svg.into());
        }
        if let Some(def) = &self.def {
            args.push("--def".into());
            args.push(def.into());
        }
        args.push("--lef".into());
        args.push(library.into());
        args.push("-o".into());
        args.push((&self.gds).into());
        args.push(config.into());
        args
    }
}

/// A named, ordered collection of scenarios
#[derive(Debug, Clone)]
pub struct Suite {
    pub name: String,
    pub description: Option<String>,
    pub default_library: String,
    pub outputs: Outputs,
    scenarios: Vec<Scenario>,
}

impl Suite {
    pub fn new(name: impl Into<String>, outputs: Outputs, scenarios: Vec<Scenario>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_library: DEFAULT_LIBRARY.to_string(),
            outputs,
            scenarios,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default_library(mut self, library: impl Into<String>) -> Self {
        self.default_library = library.into();
        self
    }

    /// Scenarios in declaration order
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Full argument vector for one scenario
    pub fn command_args(&self, scenario: &Scenario) -> Vec<OsString> {
        self.outputs
            .args(scenario.library_or(&self.default_library), &scenario.config)
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} scenarios)", self.name, self.scenarios.len())
    }
}

/// Static description of a built-in scenario
#[derive(Debug, Clone, Copy)]
pub struct ScenarioInfo {
    pub config: &'static str,
    pub library: Option<&'static str>,
    pub expected_exit_code: i32,
}

/// Static description of a built-in suite
#[derive(Debug, Clone, Copy)]
pub struct SuiteInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub svg: Option<&'static str>,
    pub def: Option<&'static str>,
    pub gds: &'static str,
    pub scenarios: &'static [ScenarioInfo],
}

impl SuiteInfo {
    pub fn to_suite(&self) -> Suite {
        let outputs = Outputs {
            svg: self.svg.map(PathBuf::from),
            def: self.def.map(PathBuf::from),
            gds: PathBuf::from(self.gds),
        };
        let scenarios = self
            .scenarios
            .iter()
            .map(|info| Scenario {
                config: info.config.to_string(),
                library: info.library.map(str::to_string),
                expected_exit_code: info.expected_exit_code,
            })
            .collect();

        Suite::new(self.name, outputs, scenarios).with_description(self.description)
    }
}

const NOAREA: ScenarioInfo = ScenarioInfo {
    config: "noarea.config",
    library: None,
    expected_exit_code: 1,
};

const SYNTAX: ScenarioInfo = ScenarioInfo {
    config: "syntax.config",
    library: None,
    expected_exit_code: 1,
};

const THREECORNERS: ScenarioInfo = ScenarioInfo {
    config: "threecorners.config",
    library: None,
    expected_exit_code: 0,
};

/// All built-in suites
static SUITES: &[SuiteInfo] = &[
    SuiteInfo {
        name: "svg",
        description: "Config error handling and corner placement, SVG + GDS2 output",
        svg: Some("padring.svg"),
        def: None,
        gds: "padring.gds",
        scenarios: &[NOAREA, SYNTAX, THREECORNERS],
    },
    SuiteInfo {
        name: "def",
        description: "As 'svg', plus DEF output and a non-square corner cell library",
        svg: Some("padring.svg"),
        def: Some("padring.def"),
        gds: "padring.gds",
        scenarios: &[
            NOAREA,
            SYNTAX,
            THREECORNERS,
            ScenarioInfo {
                config: "nonsquarecorners.config",
                library: Some("nonsquarecorners.lef"),
                expected_exit_code: 0,
            },
        ],
    },
];

/// Get all built-in suites
pub fn all_suites() -> &'static [SuiteInfo] {
    SUITES
}

/// Names of the built-in suites
pub fn suite_names() -> Vec<&'static str> {
    SUITES.iter().map(|s| s.name).collect()
}

/// Get a built-in suite by name
pub fn builtin_suite(name: &str) -> Option<Suite> {
    SUITES.iter().find(|s| s.name == name).map(SuiteInfo::to_suite)
}
