//! End-to-end tests for the harness binary
//!
//! These tests run the built `padring-harness` against `mock_padring`, with
//! fixture directories created per test.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Test context with a fixtures directory and an isolated config file
struct TestContext {
    dir: TempDir,
    config: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = dir.path().join("harness.toml");
        fs::write(&config, "").expect("Failed to write config");
        Self { dir, config }
    }

    fn fixtures(&self) -> &Path {
        self.dir.path()
    }

    /// Write a mock configuration file made of directives
    fn fixture(&self, name: &str, directives: &str) -> &Self {
        fs::write(self.fixtures().join(name), directives).expect("Failed to write fixture");
        self
    }

    /// The fixtures expected by the `svg` suite, all behaving correctly
    fn svg_fixtures(&self) -> &Self {
        self.fixture("noarea.config", "stderr Die area was not specified! - aborting.\nexit 1\n")
            .fixture("syntax.config", "stderr Cannot parse configuration file -- aborting\nexit 1\n")
            .fixture("threecorners.config", "stdout Writing padring\nexit 0\n")
    }

    fn harness(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_padring-harness"))
            .args(args)
            .arg("--config")
            .arg(&self.config)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run harness")
    }

    fn run(&self, extra: &[&str]) -> Output {
        let mut args = vec![
            "run",
            "--tool",
            env!("CARGO_BIN_EXE_mock_padring"),
            "--fixtures",
            self.fixtures().to_str().unwrap(),
            "--color",
            "never",
        ];
        args.extend_from_slice(extra);
        self.harness(&args)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_svg_suite_all_pass() {
    let ctx = TestContext::new();
    ctx.svg_fixtures();

    let output = ctx.run(&[]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "noarea.config                 OK!\n\
         syntax.config                 OK!\n\
         threecorners.config           OK!\n\
         \n\
         Failed tests: 0\n"
    );
}

#[test]
fn test_tool_stdout_is_discarded_and_stderr_inherited() {
    let ctx = TestContext::new();
    ctx.svg_fixtures();

    let output = ctx.run(&[]);

    let out = stdout(&output);
    assert!(!out.contains("PADRING version mock"));
    assert!(!out.contains("Writing padring"));
    assert!(stderr(&output).contains("Die area was not specified!"));
}

#[test]
fn test_outputs_are_shared_and_overwritten() {
    let ctx = TestContext::new();
    ctx.svg_fixtures();

    ctx.run(&[]);

    // The mock writes the config name into every output; the last scenario wins.
    for output in ["padring.svg", "padring.gds"] {
        let content = fs::read_to_string(ctx.fixtures().join(output)).unwrap();
        assert_eq!(content, "threecorners.config");
    }
    assert!(!ctx.fixtures().join("padring.def").exists());
}

#[test]
fn test_unexpected_success_fails_the_run() {
    let ctx = TestContext::new();
    ctx.svg_fixtures().fixture("noarea.config", "exit 0\n");

    let output = ctx.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.starts_with("noarea.config                 *** FAIL ***\n"));
    assert!(out.contains("syntax.config                 OK!\n"));
    assert!(out.ends_with("\nFailed tests: 1\n"));
}

#[test]
fn test_report_only_exits_zero() {
    let ctx = TestContext::new();
    ctx.svg_fixtures().fixture("threecorners.config", "exit 2\n");

    let output = ctx.run(&["--report-only"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("Failed tests: 1\n"));
}

#[test]
fn test_report_only_from_config_file() {
    let ctx = TestContext::new();
    ctx.svg_fixtures().fixture("threecorners.config", "exit 2\n");
    fs::write(&ctx.config, "[defaults]\nreport_only = true\n").unwrap();

    let output = ctx.run(&[]);

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_fixtures_dir_from_config_is_relative_to_the_file() {
    let ctx = TestContext::new();
    let fixtures = ctx.fixtures().join("cases");
    fs::create_dir(&fixtures).unwrap();
    for (name, code) in [("noarea.config", 1), ("syntax.config", 1), ("threecorners.config", 0)] {
        fs::write(fixtures.join(name), format!("exit {}\n", code)).unwrap();
    }
    fs::write(
        &ctx.config,
        format!(
            "[tool]\npath = \"{}\"\n\n[defaults]\nfixtures_dir = \"cases\"\n",
            env!("CARGO_BIN_EXE_mock_padring")
        ),
    )
    .unwrap();

    let output = ctx.harness(&["run", "--color", "never"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("Failed tests: 0\n"));
    assert!(fixtures.join("padring.gds").exists());
}

#[test]
fn test_fixtures_path_that_is_a_file_is_a_harness_error() {
    let ctx = TestContext::new();

    let output = ctx.harness(&[
        "run",
        "--tool",
        env!("CARGO_BIN_EXE_mock_padring"),
        "--fixtures",
        ctx.config.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("is not a directory"));
}

#[test]
fn test_missing_fixture_is_a_fail_not_an_abort() {
    let ctx = TestContext::new();
    ctx.fixture("noarea.config", "exit 1\n")
        .fixture("threecorners.config", "exit 0\n");

    let output = ctx.run(&[]);

    // The mock exits 1 for an unreadable config, which is what syntax.config expects.
    let out = stdout(&output);
    assert!(out.contains("syntax.config                 OK!\n"));
    assert!(out.ends_with("Failed tests: 0\n"));
}

#[test]
fn test_def_suite_with_nonsquare_corners() {
    let ctx = TestContext::new();
    ctx.svg_fixtures()
        .fixture("nonsquarecorners.config", "require-lef nonsquarecorners.lef\nexit 0\n");

    let output = ctx.run(&["--suite", "def"]);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("nonsquarecorners.config       OK!\n"));
    assert!(ctx.fixtures().join("padring.def").exists());
}

#[test]
fn test_wrong_library_is_reported_as_fail() {
    let ctx = TestContext::new();
    ctx.fixture("nonsquarecorners.config", "require-lef nonsquarecorners.lef\nexit 0\n");
    let suite = ctx.fixtures().join("wrong.yaml");
    fs::write(
        &suite,
        "name: wrong\nscenarios:\n  - config: nonsquarecorners.config\n    expect: 0\n",
    )
    .unwrap();

    let output = ctx.run(&["--suite-file", suite.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "nonsquarecorners.config       *** FAIL ***\n\nFailed tests: 1\n"
    );
}

#[test]
fn test_empty_suite_file() {
    let ctx = TestContext::new();
    let suite = ctx.fixtures().join("empty.yaml");
    fs::write(&suite, "name: empty\nscenarios: []\n").unwrap();

    let output = ctx.run(&["--suite-file", suite.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\nFailed tests: 0\n");
}

#[test]
fn test_capture_stderr_shows_only_failures() {
    let ctx = TestContext::new();
    ctx.svg_fixtures()
        .fixture("threecorners.config", "stderr Corner cell missing\nexit 1\n");

    let output = ctx.run(&["--capture-stderr"]);

    let err = stderr(&output);
    assert!(err.contains("--- stderr from threecorners.config ---"));
    assert!(err.contains("    Corner cell missing"));
    assert!(!err.contains("Die area was not specified!"));
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_tool_is_a_harness_error() {
    let ctx = TestContext::new();
    ctx.svg_fixtures();

    let output = ctx.harness(&[
        "run",
        "--tool",
        "./no/such/padring",
        "--fixtures",
        ctx.fixtures().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Error: Tool under test './no/such/padring' not found"));
}

#[test]
fn test_unknown_suite_is_a_harness_error() {
    let ctx = TestContext::new();

    let output = ctx.run(&["--suite", "nope"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown suite 'nope'. Available: svg, def"));
}

#[test]
fn test_invalid_suite_file_is_a_harness_error() {
    let ctx = TestContext::new();
    let suite = ctx.fixtures().join("bad.yaml");
    fs::write(&suite, "name: bad\nscenarios:\n  - config: a.config\n    expect: 300\n").unwrap();

    let output = ctx.run(&["--suite-file", suite.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("must be 0..=255"));
}

#[test]
fn test_list_does_not_invoke_tool() {
    let ctx = TestContext::new();
    fs::write(&ctx.config, "[tool]\npath = \"../build/padring\"\n").unwrap();

    let output = ctx.harness(&["list", "--suite", "def"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.starts_with("Suite: def"));
    // Relative tool paths in the config file are anchored at the file's directory.
    let tool = ctx.fixtures().join("../build/padring");
    assert!(out.contains(&format!(
        "{} --svg padring.svg --def padring.def --lef nonsquarecorners.lef -o padring.gds nonsquarecorners.config",
        tool.display()
    )));
    assert_eq!(out.lines().count(), 5);
}

#[test]
fn test_suites_lists_builtins() {
    let ctx = TestContext::new();

    let output = ctx.harness(&["suites"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("svg"));
    assert!(out.contains("def"));
    assert!(out.contains("(4 scenarios)"));
}
