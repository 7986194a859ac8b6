//! Configuration layer merging logic
//!
//! Layers are applied in order: Global -> Project -> Explicit file -> Flags.
//! A later layer replaces a key only when it sets it; lists are replaced,
//! never concatenated.

use std::path::Path;

use super::schema::{ConfigLayer, DeployConfig, ToolLayer};

/// Overlay `layer` onto `base`
pub fn merge_layers(base: ConfigLayer, layer: ConfigLayer) -> ConfigLayer {
    ConfigLayer {
        project_dir: layer.project_dir.or(base.project_dir),
        publish_dir: layer.publish_dir.or(base.publish_dir),
        production: layer.production.or(base.production),
        provider: layer.provider.or(base.provider),
        responses: layer.responses.or(base.responses),
        tool: ToolLayer {
            command: layer.tool.command.or(base.tool.command),
            args: layer.tool.args.or(base.tool.args),
        },
    }
}

/// Merge all layers and fill the remaining keys with defaults
///
/// # Arguments
/// * `layers` - Configuration layers, lowest precedence first
/// * `invoking_dir` - Directory relative `project_dir` values resolve against
pub fn resolve_config<I>(layers: I, invoking_dir: &Path) -> anyhow::Result<DeployConfig>
where
    I: IntoIterator<Item = ConfigLayer>,
{
    let merged = layers
        .into_iter()
        .fold(ConfigLayer::default(), merge_layers);
    merged.validate()?;

    let project_dir = match merged.project_dir {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => invoking_dir.join(dir),
        None => invoking_dir.to_path_buf(),
    };

    let mut config = DeployConfig::defaults(project_dir);
    if let Some(publish_dir) = merged.publish_dir {
        config.publish_dir = publish_dir;
    }
    if let Some(production) = merged.production {
        config.production = production;
    }
    if let Some(provider) = merged.provider {
        config.provider = provider;
    }
    if let Some(responses) = merged.responses {
        config.responses = responses;
    }
    if let Some(command) = merged.tool.command {
        config.tool.command = command;
    }
    if let Some(args) = merged.tool.args {
        config.tool.args = args;
    }

    Ok(config)
}
