//! CLI command definitions and handlers.

pub mod delete;
pub mod findings;
pub mod list;
pub mod start;
pub mod status;
pub mod watch;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use scanwatch_core::client::ScanServiceClient;

use crate::config::{AppConfig, Overrides, Settings};

/// ScanWatch - start code-security scans and follow their progress
#[derive(Parser)]
#[command(name = "scanwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection flags shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ApiArgs {
    /// Scanning service root URL
    #[arg(long, env = "SCANWATCH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SCANWATCH_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Follow a scan until it finishes
    Watch(watch::WatchArgs),
    /// Show a scan's current state once
    Status(status::StatusArgs),
    /// List a project's scans
    List(list::ListArgs),
    /// Start a new scan
    #[command(subcommand)]
    Start(start::StartCommand),
    /// Delete a scan
    Delete(delete::DeleteArgs),
    /// Download a scan's findings as CSV
    Findings(findings::FindingsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded; watched scans completed.
    Success = 0,
    /// Request, configuration, or validation error.
    Error = 1,
    /// A watched scan ended failed or cancelled.
    ScanUnsuccessful = 2,
    /// Watching was stopped with Ctrl+C.
    Interrupted = 130,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Watch(args) => watch::run(&cli.api, args),
        Commands::Status(args) => status::run(&cli.api, args),
        Commands::List(args) => list::run(&cli.api, args),
        Commands::Start(cmd) => start::run(&cli.api, cmd),
        Commands::Delete(args) => delete::run(&cli.api, args),
        Commands::Findings(args) => findings::run(&cli.api, args),
    }
}

/// Load config files and layer CLI overrides on top.
pub(crate) fn settings(api: &ApiArgs, interval_ms: Option<u64>) -> anyhow::Result<Settings> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let overrides = Overrides {
        base_url: api.base_url.clone(),
        timeout_secs: api.timeout_secs,
        interval_ms,
    };
    Ok(config.resolve(&overrides)?)
}

/// Build a service client from resolved settings.
pub(crate) fn client(settings: &Settings) -> anyhow::Result<ScanServiceClient> {
    ScanServiceClient::new(&settings.api)
        .with_context(|| format!("cannot use service at {}", settings.api.base_url))
}
