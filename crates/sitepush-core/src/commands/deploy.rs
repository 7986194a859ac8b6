//! Deploy command implementation.
//!
//! Resolves configuration layers, builds the invocation, runs the deploy
//! tool and turns the outcome into a [`DeployReport`].

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::Utc;

use crate::config::{ConfigLayer, ConfigStore, ResolvedConfig};
use crate::deploy::{DeployPlan, DeployReport, OutputSink, run_deploy};

/// Options for the deploy command; every `Some` overrides the config files
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    /// Extra config file layered above the project file
    pub config_file: Option<PathBuf>,
    /// Working directory for the deploy tool
    pub project_dir: Option<PathBuf>,
    /// Build output folder
    pub publish_dir: Option<String>,
    /// `Some(false)` requests a draft deploy
    pub production: Option<bool>,
    /// Provider name for URL detection
    pub provider: Option<String>,
    /// Print the plan without running anything
    pub dry_run: bool,
}

impl DeployOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    pub fn with_publish_dir(mut self, dir: impl Into<String>) -> Self {
        self.publish_dir = Some(dir.into());
        self
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        if draft {
            self.production = Some(false);
        }
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            project_dir: self.project_dir.clone(),
            publish_dir: self.publish_dir.clone(),
            production: self.production,
            provider: self.provider.clone(),
            ..Default::default()
        }
    }
}

/// Deploy command orchestrator
#[derive(Debug)]
pub struct DeployCommand {
    store: ConfigStore,
}

impl DeployCommand {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Create a deploy command reading config from the default locations
    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(ConfigStore::with_defaults()?))
    }

    pub fn resolve_config(&self, options: &DeployOptions) -> anyhow::Result<ResolvedConfig> {
        self.store
            .resolve(options.config_file.as_deref(), options.overrides())
            .context("Failed to resolve deploy configuration")
    }

    pub fn plan(&self, options: &DeployOptions) -> anyhow::Result<DeployPlan> {
        let resolved = self.resolve_config(options)?;
        Ok(DeployPlan::from_config(&resolved.config))
    }

    /// Run the deploy and report the outcome.
    ///
    /// A tool that exits non-zero yields `Ok` with `success == false`;
    /// `Err` means the tool could not be run or its output could not be read.
    pub fn execute(
        &self,
        options: &DeployOptions,
        sink: &mut dyn OutputSink,
    ) -> anyhow::Result<DeployReport> {
        let plan = self.plan(options)?;
        plan.preflight()?;

        let command = plan.to_string();
        if options.dry_run {
            tracing::info!(%command, dir = %plan.working_dir.display(), "Dry run; not starting deploy tool");
            return Ok(DeployReport::dry_run(command, plan.working_dir.clone()));
        }

        tracing::info!(%command, dir = %plan.working_dir.display(), "Deploying");
        let started_at = Utc::now();
        let timer = Instant::now();

        let outcome = run_deploy(&plan, sink)?;

        let elapsed_ms = u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX);
        Ok(DeployReport::from_outcome(
            outcome,
            command,
            plan.working_dir.clone(),
            started_at,
            elapsed_ms,
        ))
    }
}
