//! End-to-end tests for the `sitepush` binary with `sh` scripts as the deploy tool.
#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Fixture {
    temp: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("global")).unwrap();
        std::fs::create_dir_all(temp.path().join("project/dist")).unwrap();
        Self { temp }
    }

    fn project(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    /// Point the project config at a script run with `sh`.
    fn with_tool(self, body: &str) -> Self {
        let script = self.temp.path().join("tool.sh");
        std::fs::write(&script, format!("{body}\n")).unwrap();
        std::fs::write(
            self.project().join("sitepush.toml"),
            format!("[tool]\ncommand = \"sh\"\nargs = [\"{}\"]\n", script.display()),
        )
        .unwrap();
        self
    }

    fn run(&self, args: &[&str]) -> Output {
        sitepush(&self.project(), &self.temp.path().join("global"), args)
    }
}

fn sitepush(cwd: &Path, global_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sitepush"))
        .args(args)
        .current_dir(cwd)
        .env("SITEPUSH_CONFIG_DIR", global_dir)
        .env("RUST_LOG", "off")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn no_arguments_deploys_and_exits_zero() {
    let fixture = Fixture::new()
        .with_tool("echo 'Deploying to Netlify...'\necho 'Website URL: https://demo.netlify.app'");

    let output = fixture.run(&[]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Deploying to Netlify..."));
    assert!(out.contains("Found URL: https://demo.netlify.app"));
}

#[test]
fn tool_failure_exits_one() {
    let fixture = Fixture::new().with_tool("echo 'Error: unauthorized' >&2\nexit 7");

    let output = fixture.run(&["deploy"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error: unauthorized"));
    assert!(stdout(&output).contains("Deploy failed"));
}

#[test]
fn missing_tool_prints_error_and_exits_one() {
    let fixture = Fixture::new();
    std::fs::write(
        fixture.project().join("sitepush.toml"),
        "[tool]\ncommand = \"sitepush-test-no-such-deploy-tool\"\n",
    )
    .unwrap();

    let output = fixture.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Error:"));
    assert!(err.contains("sitepush-test-no-such-deploy-tool"));
}

#[test]
fn no_confirmation_without_provider_url() {
    let fixture = Fixture::new().with_tool("echo 'Uploaded 3 files to https://example.com'");

    let output = fixture.run(&[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("Found URL"));
}

#[test]
fn answers_two_prompts_with_blank_lines() {
    let fixture = Fixture::new().with_tool(
        "n=0\nwhile IFS= read -r line; do n=$((n+1)); echo \"answer $n: [$line]\"; done\necho \"answers: $n\"",
    );

    let output = fixture.run(&["-f", "quiet"]);

    assert_eq!(stdout(&output), "answer 1: []\nanswer 2: []\nanswers: 2\n");
}

#[test]
fn json_report_keeps_stdout_parseable() {
    let fixture = Fixture::new().with_tool("echo 'Website URL: https://demo.netlify.app'");

    let output = fixture.run(&["deploy", "--format", "json"]);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["tool_exit_code"], 0);
    assert_eq!(report["urls"][0], "https://demo.netlify.app");
    assert!(stderr(&output).contains("Website URL"));
}

#[test]
fn dry_run_prints_command_without_running() {
    let fixture = Fixture::new().with_tool("exit 9");

    let output = fixture.run(&["deploy", "--dry-run", "--draft", "--dir", "build"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Dry run"));
    assert!(out.contains("--dir=build"));
    assert!(!out.contains("--prod"));
}

#[test]
fn missing_project_dir_exits_one() {
    let fixture = Fixture::new();

    let output = fixture.run(&["deploy", "--project-dir", "does-not-exist"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Project directory does not exist"));
}

#[test]
fn config_command_shows_resolved_layers() {
    let fixture = Fixture::new();
    std::fs::write(
        fixture.temp.path().join("global/sitepush.toml"),
        "provider = \"netlify\"\npublish_dir = \"public\"\n",
    )
    .unwrap();
    std::fs::write(fixture.project().join("sitepush.toml"), "publish_dir = \"dist\"\n").unwrap();

    let output = fixture.run(&["config", "--format", "json"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["config"]["publish_dir"], "dist");
    assert_eq!(value["config"]["responses"], serde_json::json!(["", ""]));
    assert_eq!(value["sources"].as_array().map(Vec::len), Some(2));
}

#[test]
fn init_writes_project_config_once() {
    let fixture = Fixture::new();

    let first = fixture.run(&["init"]);
    assert_eq!(first.status.code(), Some(0));
    let content = std::fs::read_to_string(fixture.project().join("sitepush.toml")).unwrap();
    assert!(content.contains("publish_dir = \"dist\""));

    let second = fixture.run(&["init"]);
    assert_eq!(second.status.code(), Some(1));
    assert!(stderr(&second).contains("already exists"));

    let forced = fixture.run(&["init", "--force"]);
    assert_eq!(forced.status.code(), Some(0));
}
