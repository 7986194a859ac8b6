//! TOML parser with helpful error messages

use super::schema::ConfigLayer;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a sitepush.toml file with detailed error messages
pub fn parse_layer_file(path: &Path) -> Result<ConfigLayer> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_layer_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse sitepush.toml content from string
pub fn parse_layer_str(content: &str) -> Result<ConfigLayer> {
    let layer: ConfigLayer =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    layer.validate()?;

    Ok(layer)
}

/// Enhance TOML parsing errors with the offending line and its neighbours
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let message = error.message().to_string();

    // An error at EOF after a trailing newline is reported on the last line
    let last_line = content.lines().count().max(1);
    let line_hint = error.span().map(|span| {
        let line = content[..span.start.min(content.len())].matches('\n').count() + 1;
        line.min(last_line)
    });

    match line_hint {
        Some(line_num) => {
            let context = get_line_context(content, line_num);
            anyhow::anyhow!(
                "TOML parsing error at line {}:\n{}\n\nError: {}",
                line_num,
                context,
                message
            )
        }
        None => anyhow::anyhow!("TOML parsing error: {}", message),
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 2).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a configuration layer to a TOML string
pub fn to_toml(layer: &ConfigLayer) -> Result<String> {
    toml::to_string_pretty(layer).with_context(|| "Failed to serialize configuration to TOML")
}
