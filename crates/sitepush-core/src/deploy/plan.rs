//! Deploy tool invocation built from a resolved configuration.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::DeployConfig;

/// Everything needed to launch one deploy run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployPlan {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Lines written to the tool's stdin, in order
    pub responses: Vec<String>,
    /// Provider name used for URL detection
    pub provider: String,
    #[serde(skip)]
    publish_dir: String,
}

impl DeployPlan {
    /// Arguments are `tool.args`, then `--prod` when production, then `--dir=<publish_dir>`.
    pub fn from_config(config: &DeployConfig) -> Self {
        let mut args = config.tool.args.clone();
        if config.production {
            args.push("--prod".to_string());
        }
        args.push(format!("--dir={}", config.publish_dir));

        Self {
            program: config.tool.command.clone(),
            args,
            working_dir: config.project_dir.clone(),
            responses: config.responses.clone(),
            provider: config.provider.clone(),
            publish_dir: config.publish_dir.clone(),
        }
    }

    pub fn publish_path(&self) -> PathBuf {
        self.working_dir.join(&self.publish_dir)
    }

    /// Check the working directory before spawning anything.
    ///
    /// A missing build output is only a warning: the deploy tool reports
    /// that itself.
    pub fn preflight(&self) -> anyhow::Result<()> {
        if !self.working_dir.is_dir() {
            anyhow::bail!(
                "Project directory does not exist or is not a directory: {}",
                self.working_dir.display()
            );
        }

        let publish_path = self.publish_path();
        if !publish_path.is_dir() {
            tracing::warn!(
                path = %publish_path.display(),
                "Publish directory not found; has the site been built?"
            );
        }

        Ok(())
    }
}

impl fmt::Display for DeployPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@+,".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
