//! Sitepush Core Library
//!
//! Deploys a prebuilt static site by driving the hosting provider's CLI:
//! layered configuration, the tool invocation, prompt answering, output
//! relay and published-URL detection.

pub mod commands;
pub mod config;
pub mod deploy;

