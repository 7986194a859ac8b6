//! Init command: write a project sitepush.toml holding the defaults.

use std::path::PathBuf;

use crate::config::{ConfigLayer, ConfigStore};

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Directory to write sitepush.toml into (defaults to the invoking dir)
    pub project_dir: Option<PathBuf>,
    /// Overwrite an existing file
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct InitReport {
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct InitCommand {
    store: ConfigStore,
}

impl InitCommand {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::new(ConfigStore::with_defaults()?))
    }

    pub fn execute(&self, options: &InitOptions) -> anyhow::Result<InitReport> {
        let project_root = options
            .project_dir
            .clone()
            .unwrap_or_else(|| self.store.invoking_dir().to_path_buf());

        let path = self
            .store
            .save_project(&project_root, &ConfigLayer::defaults(), options.force)?;
        tracing::info!(path = %path.display(), "Wrote project config");

        Ok(InitReport { path })
    }
}
