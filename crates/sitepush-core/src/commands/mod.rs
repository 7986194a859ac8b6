//! High-level commands for sitepush operations.
//!
//! These are the public entry points the CLI calls; each takes an options
//! struct and returns a report.

pub mod deploy;
pub mod init;

pub use deploy::{DeployCommand, DeployOptions};
pub use init::{InitCommand, InitOptions, InitReport};
