//! Configuration management
//!
//! Supports three file layers plus command-line overrides:
//! - Global: ~/.config/sitepush/sitepush.toml (or `$SITEPUSH_CONFIG_DIR`)
//! - Project: ./sitepush.toml in the project directory
//! - Explicit: a file passed with `--config`

pub mod merge;
pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use merge::{merge_layers, resolve_config};
pub use parser::{parse_layer_file, parse_layer_str, to_toml};
pub use paths::{CONFIG_DIR_ENV, CONFIG_FILE_NAME, global_config_dir, project_config_path};
pub use schema::{ConfigLayer, DeployConfig, ToolConfig, ToolLayer};
pub use store::{ConfigStore, ResolvedConfig};
