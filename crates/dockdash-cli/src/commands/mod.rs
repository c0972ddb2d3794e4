//! CLI command definitions and dispatch.

pub mod logs;
pub mod ps;
pub mod serve;
pub mod start;
pub mod stop;

use clap::{Parser, Subcommand, ValueEnum};
use dockdash_common::constants::{BIN_NAME, DEFAULT_SERVER_URL};

/// dockdash — container dashboard with idle auto-stop.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of a running dashboard, used by the client commands.
    #[arg(long, global = true, env = "DOCKDASH_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the dashboard server.
    Serve(serve::ServeArgs),
    /// List containers with their remaining auto-stop time.
    Ps(ps::PsArgs),
    /// Start a container and open its idle window.
    Start(start::StartArgs),
    /// Stop a container and drop its timer.
    Stop(stop::StopArgs),
    /// View container logs.
    Logs(logs::LogsArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => serve::execute(args).await,
        Command::Ps(args) => ps::execute(&cli.server, args).await,
        Command::Start(args) => start::execute(&cli.server, args).await,
        Command::Stop(args) => stop::execute(&cli.server, args).await,
        Command::Logs(args) => logs::execute(&cli.server, args).await,
    }
}
