//! Sitepush - deploy a static site build through the hosting provider's CLI
//!
//! Usage:
//!   sitepush              # Deploy using ./sitepush.toml (or defaults)
//!   sitepush deploy ...   # Deploy with command-line overrides
//!   sitepush config       # Show the resolved configuration
//!   sitepush init         # Write ./sitepush.toml with the defaults

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitepush_core::commands::{DeployCommand, DeployOptions, InitCommand, InitOptions};
use sitepush_core::deploy::EXIT_FAILURE;

use crate::output::{ConsoleSink, RelayTarget};

#[derive(Parser)]
#[command(name = "sitepush")]
#[command(about = "Deploy a static site build through the provider's CLI", long_about = None)]
struct Cli {
    /// Extra config file, layered over the global and project sitepush.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the publish directory (default when no command is given)
    Deploy(DeployArgs),

    /// Show the resolved configuration and the files it came from
    Config {
        #[command(flatten)]
        overrides: OverrideArgs,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Write a sitepush.toml holding the default settings
    Init {
        /// Directory to write sitepush.toml into
        #[arg(long, value_name = "DIR")]
        project_dir: Option<PathBuf>,

        /// Overwrite an existing sitepush.toml
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Default)]
struct DeployArgs {
    #[command(flatten)]
    overrides: OverrideArgs,

    /// Print the deploy command without running it
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

/// Flags that override config file values
#[derive(Args, Default)]
struct OverrideArgs {
    /// Directory the deploy tool runs in
    #[arg(long, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Build output folder, relative to the project directory
    #[arg(long = "dir", value_name = "DIR")]
    publish_dir: Option<String>,

    /// Create a draft deploy instead of a production one
    #[arg(long)]
    draft: bool,

    /// Provider name expected in the published URL line
    #[arg(long)]
    provider: Option<String>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable summary
    #[default]
    Table,
    /// Machine-readable JSON (tool output is relayed to stderr)
    Json,
    /// Relay tool output only, no summary
    Quiet,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            output::print_error(&err);
            exit_code(EXIT_FAILURE)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "sitepush=debug,sitepush_core=debug,warn"
    } else {
        "sitepush=info,sitepush_core=info,warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.config;
    match cli.command.unwrap_or(Commands::Deploy(DeployArgs::default())) {
        Commands::Deploy(args) => run_deploy(config, args),
        Commands::Config { overrides, format } => {
            run_config(config, overrides, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { project_dir, force } => {
            run_init(project_dir, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn deploy_options(config: Option<PathBuf>, overrides: OverrideArgs) -> DeployOptions {
    let mut options = DeployOptions::new().with_draft(overrides.draft);
    if let Some(path) = config {
        options = options.with_config_file(path);
    }
    if let Some(dir) = overrides.project_dir {
        options = options.with_project_dir(dir);
    }
    if let Some(dir) = overrides.publish_dir {
        options = options.with_publish_dir(dir);
    }
    if let Some(provider) = overrides.provider {
        options = options.with_provider(provider);
    }
    options
}

fn run_deploy(config: Option<PathBuf>, args: DeployArgs) -> Result<ExitCode> {
    let options = deploy_options(config, args.overrides).with_dry_run(args.dry_run);

    let relay = match args.format {
        OutputFormat::Json => RelayTarget::Stderr,
        OutputFormat::Table | OutputFormat::Quiet => RelayTarget::Stdout,
    };
    let mut sink = ConsoleSink::new(relay);

    let cmd = DeployCommand::with_defaults()?;
    let report = cmd.execute(&options, &mut sink)?;
    tracing::debug!(
        success = report.success,
        lines = report.lines,
        urls = report.urls.len(),
        "Deploy finished"
    );

    match args.format {
        OutputFormat::Table => output::print_report_table(&report),
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Quiet => {}
    }

    Ok(exit_code(report.exit_code()))
}

fn run_config(config: Option<PathBuf>, overrides: OverrideArgs, format: OutputFormat) -> Result<()> {
    let options = deploy_options(config, overrides);
    let cmd = DeployCommand::with_defaults()?;
    let resolved = cmd.resolve_config(&options)?;

    match format {
        OutputFormat::Table => output::print_config_table(&resolved),
        OutputFormat::Json => output::print_config_json(&resolved)?,
        OutputFormat::Quiet => {}
    }

    Ok(())
}

fn run_init(project_dir: Option<PathBuf>, force: bool) -> Result<()> {
    let cmd = InitCommand::with_defaults()?;
    let report = cmd.execute(&InitOptions { project_dir, force })?;
    println!("✓ Wrote {}", report.path.display());
    Ok(())
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
