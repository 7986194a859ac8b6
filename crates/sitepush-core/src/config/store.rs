//! Config store for loading, layering and saving sitepush.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::merge::resolve_config;
use super::paths::{global_config_dir, global_config_path, project_config_path};
use super::schema::{ConfigLayer, DeployConfig};
use super::{parser, parse_layer_file};

/// Resolved configuration plus the files it was read from, lowest precedence first.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: DeployConfig,
    pub sources: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    global_dir: Option<PathBuf>,
    invoking_dir: PathBuf,
}

impl ConfigStore {
    pub fn with_defaults() -> anyhow::Result<Self> {
        let invoking_dir =
            std::env::current_dir().context("Could not determine current directory")?;
        Ok(Self::from_paths(global_config_dir(), invoking_dir))
    }

    pub fn from_paths(global_dir: Option<PathBuf>, invoking_dir: PathBuf) -> Self {
        Self {
            global_dir,
            invoking_dir,
        }
    }

    pub fn invoking_dir(&self) -> &Path {
        &self.invoking_dir
    }

    /// Load the global layer; a missing file is an empty layer.
    pub fn load_global(&self) -> anyhow::Result<Option<(PathBuf, ConfigLayer)>> {
        match &self.global_dir {
            Some(dir) => load_optional(&global_config_path(dir)),
            None => Ok(None),
        }
    }

    /// Load `<project_root>/sitepush.toml`; a missing file is an empty layer.
    pub fn load_project(
        &self,
        project_root: &Path,
    ) -> anyhow::Result<Option<(PathBuf, ConfigLayer)>> {
        load_optional(&project_config_path(project_root))
    }

    /// Load a file named on the command line; it must exist.
    pub fn load_explicit(&self, path: &Path) -> anyhow::Result<(PathBuf, ConfigLayer)> {
        let path = self.absolutize(path);
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let layer = parse_layer_file(&path)?;
        Ok((path, layer))
    }

    /// Resolve Global -> Project -> Explicit -> `overrides`.
    ///
    /// The project file is looked up in the `project_dir` named by
    /// `overrides`, else by the explicit file, else by the global file, else
    /// in the invoking directory.
    pub fn resolve(
        &self,
        explicit: Option<&Path>,
        overrides: ConfigLayer,
    ) -> anyhow::Result<ResolvedConfig> {
        let global = self.load_global()?;
        let explicit = explicit.map(|path| self.load_explicit(path)).transpose()?;

        let lookup_root = [
            Some(&overrides),
            explicit.as_ref().map(|(_, layer)| layer),
            global.as_ref().map(|(_, layer)| layer),
        ]
        .into_iter()
        .flatten()
        .find_map(|layer| layer.project_dir.as_deref())
        .map(|dir| self.absolutize(dir))
        .unwrap_or_else(|| self.invoking_dir.clone());
        let project = self.load_project(&lookup_root)?;

        let mut layers = Vec::new();
        let mut sources = Vec::new();
        for (kind, loaded) in [("global", global), ("project", project), ("explicit", explicit)] {
            if let Some((path, layer)) = loaded {
                tracing::debug!(path = %path.display(), kind, "Loaded config file");
                sources.push(path);
                layers.push(layer);
            }
        }
        layers.push(overrides);

        let config = resolve_config(layers, &self.invoking_dir)?;
        Ok(ResolvedConfig { config, sources })
    }

    /// Write `layer` to `<project_root>/sitepush.toml`.
    pub fn save_project(
        &self,
        project_root: &Path,
        layer: &ConfigLayer,
        force: bool,
    ) -> anyhow::Result<PathBuf> {
        let path = project_config_path(&self.absolutize(project_root));
        if path.exists() && !force {
            anyhow::bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                path.display()
            );
        }

        let content = parser::to_toml(layer).context("Failed to serialize config to TOML")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.invoking_dir.join(path)
        }
    }
}

fn load_optional(path: &Path) -> anyhow::Result<Option<(PathBuf, ConfigLayer)>> {
    if !path.exists() {
        return Ok(None);
    }
    let layer = parse_layer_file(path)?;
    Ok(Some((path.to_path_buf(), layer)))
}
