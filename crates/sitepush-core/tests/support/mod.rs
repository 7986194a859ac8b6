#![allow(dead_code)]

use std::path::{Path, PathBuf};

use sitepush_core::config::{DeployConfig, ToolConfig};
use sitepush_core::deploy::OutputSink;

/// Write a shell script standing in for the deploy CLI.
///
/// Scripts are run through `sh` rather than executed directly, so they need
/// no exec bit and cannot hit ETXTBSY while other tests spawn processes.
pub fn write_fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("{body}\n")).unwrap();
    path
}

/// Config that runs `script` with `sh` from `project_dir`.
pub fn fake_tool_config(project_dir: &Path, script: &Path) -> DeployConfig {
    let mut config = DeployConfig::defaults(project_dir.to_path_buf());
    config.tool = ToolConfig {
        command: "sh".to_string(),
        args: vec![script.to_string_lossy().to_string()],
    };
    config
}

/// Reads every line it was given until EOF, then reports them.
pub const ECHO_RESPONSES: &str = r#"
n=0
while IFS= read -r line; do
  n=$((n+1))
  echo "response $n: [$line]"
done
echo "received $n responses"
"#;

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub lines: Vec<String>,
    pub urls: Vec<String>,
}

impl OutputSink for RecordingSink {
    fn line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn url_found(&mut self, url: &str) {
        self.urls.push(url.to_string());
    }
}
