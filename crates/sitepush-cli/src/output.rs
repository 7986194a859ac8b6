//! Console rendering for relayed tool output and reports.

use anyhow::Result;
use console::style;
use serde::Serialize;

use sitepush_core::config::ResolvedConfig;
use sitepush_core::deploy::{DeployReport, OutputSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayTarget {
    Stdout,
    Stderr,
}

/// Echoes each line of the deploy tool's output as it arrives.
#[derive(Debug)]
pub struct ConsoleSink {
    target: RelayTarget,
}

impl ConsoleSink {
    pub fn new(target: RelayTarget) -> Self {
        Self { target }
    }

    fn emit(&self, text: &str) {
        match self.target {
            RelayTarget::Stdout => println!("{text}"),
            RelayTarget::Stderr => eprintln!("{text}"),
        }
    }
}

impl OutputSink for ConsoleSink {
    fn line(&mut self, line: &str) {
        self.emit(line);
    }

    fn url_found(&mut self, url: &str) {
        let banner = format!(
            "\n{} {}",
            style("✅ Found URL:").green().bold(),
            style(url).cyan().underlined()
        );
        self.emit(&banner);
    }
}

pub fn print_report_table(report: &DeployReport) {
    println!();
    if report.dry_run {
        println!("• Dry run, nothing deployed");
        println!("  Command:   {}", report.command);
        println!("  Directory: {}", report.project_dir.display());
        return;
    }

    if report.success {
        println!(
            "{} Deploy finished in {:.1}s",
            style("✓").green(),
            report.elapsed_ms as f64 / 1000.0
        );
    } else {
        let code = report
            .tool_exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        println!(
            "{} Deploy failed (deploy tool exit status: {})",
            style("✗").red(),
            code
        );
    }

    match report.deploy_url() {
        Some(url) => println!("  URL: {}", url),
        None if report.success => println!("  ⚠ No deploy URL found in the tool output"),
        None => {}
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_config_table(resolved: &ResolvedConfig) {
    let config = &resolved.config;

    println!("Project directory: {}", config.project_dir.display());
    println!("Publish directory: {}", config.publish_dir);
    println!(
        "Deploy type:       {}",
        if config.production { "production" } else { "draft" }
    );
    println!("Provider:          {}", config.provider);
    println!(
        "Tool:              {} {}",
        config.tool.command,
        config.tool.args.join(" ")
    );
    println!("Prompt responses:  {}", config.responses.len());
    for (index, response) in config.responses.iter().enumerate() {
        let shown = if response.is_empty() {
            "(blank line)".to_string()
        } else {
            format!("{:?}", response)
        };
        println!("  {}. {}", index + 1, shown);
    }

    println!();
    if resolved.sources.is_empty() {
        println!("No config files found; using defaults.");
    } else {
        println!("Config files (lowest precedence first):");
        for source in &resolved.sources {
            println!("  {}", source.display());
        }
    }
}

pub fn print_config_json(resolved: &ResolvedConfig) -> Result<()> {
    let output = serde_json::json!({
        "config": resolved.config,
        "sources": resolved.sources,
    });
    print_json(&output)
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", style("Error:").red().bold(), err);
}
