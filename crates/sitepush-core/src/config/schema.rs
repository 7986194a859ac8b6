//! Configuration schema for sitepush.toml
//!
//! Every key is optional in a file. Layers are combined by
//! [`super::merge::merge_layers`] and defaults are applied last by
//! [`super::merge::resolve_config`]:
//! - Global: ~/.config/sitepush/sitepush.toml
//! - Project: ./sitepush.toml
//! - Explicit: --config <file>

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PUBLISH_DIR: &str = "dist";
pub const DEFAULT_PROVIDER: &str = "netlify";
pub const DEFAULT_TOOL_COMMAND: &str = "npx";

/// One configuration layer as written in a sitepush.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    /// Working directory for the deploy tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<PathBuf>,

    /// Build output folder, relative to the project directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_dir: Option<String>,

    /// Request a production deploy (`--prod`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<bool>,

    /// Provider name expected in the published URL line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Answers written to the tool's stdin, one line each
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "ToolLayer::is_empty")]
    pub tool: ToolLayer,
}

/// `[tool]` table: how the deploy CLI is launched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

impl ToolLayer {
    pub fn is_empty(&self) -> bool {
        self.command.is_none() && self.args.is_none()
    }
}

impl ConfigLayer {
    /// Layer holding every default value, as written by `sitepush init`.
    pub fn defaults() -> Self {
        Self {
            project_dir: None,
            publish_dir: Some(DEFAULT_PUBLISH_DIR.to_string()),
            production: Some(true),
            provider: Some(DEFAULT_PROVIDER.to_string()),
            responses: Some(default_responses()),
            tool: ToolLayer {
                command: Some(DEFAULT_TOOL_COMMAND.to_string()),
                args: Some(default_tool_args()),
            },
        }
    }

    /// Validate the keys this layer sets.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(publish_dir) = &self.publish_dir {
            if publish_dir.trim().is_empty() {
                anyhow::bail!("publish_dir must not be empty");
            }
        }

        if let Some(provider) = &self.provider {
            if provider.trim().is_empty() {
                anyhow::bail!("provider must not be empty");
            }
        }

        if let Some(command) = &self.tool.command {
            if command.trim().is_empty() {
                anyhow::bail!("tool.command must not be empty");
            }
        }

        if let Some(responses) = &self.responses {
            for (index, response) in responses.iter().enumerate() {
                if response.contains('\n') || response.contains('\r') {
                    anyhow::bail!(
                        "responses[{}] must be a single line; each response is sent followed by a newline",
                        index
                    );
                }
            }
        }

        Ok(())
    }
}

/// Fully resolved deploy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployConfig {
    pub project_dir: PathBuf,
    pub publish_dir: String,
    pub production: bool,
    pub provider: String,
    pub responses: Vec<String>,
    pub tool: ToolConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl DeployConfig {
    /// Defaults for a deploy run from `project_dir`.
    pub fn defaults(project_dir: PathBuf) -> Self {
        Self {
            project_dir,
            publish_dir: DEFAULT_PUBLISH_DIR.to_string(),
            production: true,
            provider: DEFAULT_PROVIDER.to_string(),
            responses: default_responses(),
            tool: ToolConfig {
                command: DEFAULT_TOOL_COMMAND.to_string(),
                args: default_tool_args(),
            },
        }
    }
}

fn default_tool_args() -> Vec<String> {
    vec!["netlify-cli".to_string(), "deploy".to_string()]
}

/// Two blank answers: "link to existing project", then "use git remote".
fn default_responses() -> Vec<String> {
    vec![String::new(), String::new()]
}
