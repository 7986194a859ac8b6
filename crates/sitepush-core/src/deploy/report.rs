//! Result of one `sitepush deploy` invocation.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::runner::RunOutcome;

/// Process exit code for a successful deploy.
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit code for any failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    /// True only when the tool exited with status 0 (or nothing was run)
    pub success: bool,
    /// Exit status of the deploy tool; `None` for dry runs and signals
    pub tool_exit_code: Option<i32>,
    /// URLs detected in the tool's output, in order of appearance
    pub urls: Vec<String>,
    /// Number of output lines relayed
    pub lines: usize,
    pub dry_run: bool,
    pub command: String,
    pub project_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl DeployReport {
    pub fn from_outcome(
        outcome: RunOutcome,
        command: String,
        project_dir: PathBuf,
        started_at: DateTime<Utc>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            success: outcome.success(),
            tool_exit_code: outcome.exit_code,
            urls: outcome.urls,
            lines: outcome.lines,
            dry_run: false,
            command,
            project_dir,
            started_at,
            elapsed_ms,
        }
    }

    pub fn dry_run(command: String, project_dir: PathBuf) -> Self {
        Self {
            success: true,
            tool_exit_code: None,
            urls: Vec::new(),
            lines: 0,
            dry_run: true,
            command,
            project_dir,
            started_at: Utc::now(),
            elapsed_ms: 0,
        }
    }

    /// Exit code for the sitepush process itself: 0 on success, 1 otherwise.
    ///
    /// Non-zero tool codes are not passed through.
    pub fn exit_code(&self) -> i32 {
        if self.success { EXIT_SUCCESS } else { EXIT_FAILURE }
    }

    /// Most specific URL the tool printed; the last one wins.
    pub fn deploy_url(&self) -> Option<&str> {
        self.urls.last().map(String::as_str)
    }
}
