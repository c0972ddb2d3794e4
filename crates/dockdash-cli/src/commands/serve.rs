//! `dockdash serve` — Run the dashboard server.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use dockdash_common::config::DashboardConfig;
use dockdash_common::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_IDLE_BUDGET_SECS, DEFAULT_LOG_TAIL, DEFAULT_PORT,
    DEFAULT_STATIC_DIR,
};
use dockdash_runtime::backend::{self, InMemoryBackend, SharedBackend};
use dockdash_server::DashboardServer;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// TCP port to listen on.
    #[arg(long, env = "DOCKDASH_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind.
    #[arg(long, env = "DOCKDASH_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: IpAddr,

    /// Seconds a started container may run before it is stopped.
    #[arg(long, env = "DOCKDASH_IDLE_BUDGET_SECS", default_value_t = DEFAULT_IDLE_BUDGET_SECS)]
    pub idle_budget_secs: u64,

    /// Directory holding the UI bundle.
    #[arg(long, env = "DOCKDASH_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,

    /// Number of log lines returned per request.
    #[arg(long, env = "DOCKDASH_LOG_TAIL", default_value_t = DEFAULT_LOG_TAIL)]
    pub log_tail: usize,

    /// Serve fake containers instead of connecting to Docker.
    #[arg(long)]
    pub demo: bool,
}

impl ServeArgs {
    /// Builds the server configuration from the parsed flags.
    pub fn into_config(self) -> DashboardConfig {
        DashboardConfig {
            bind_addr: self.bind,
            port: self.port,
            idle_budget_secs: self.idle_budget_secs,
            static_dir: self.static_dir,
            log_tail: self.log_tail,
        }
    }
}

/// Executes the `serve` command.
///
/// Connects to the engine (or builds the demo backend) and serves until
/// interrupted.
///
/// # Errors
///
/// Returns an error if the engine is unreachable, the configuration is
/// invalid, or the listener cannot be bound.
pub async fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let backend: SharedBackend = if args.demo {
        tracing::info!("demo mode: serving in-memory containers");
        Arc::new(InMemoryBackend::demo())
    } else {
        backend::connect_docker().context("failed to connect to docker")?
    };

    let server = DashboardServer::new(args.into_config(), backend)?;
    server.run().await?;
    Ok(())
}
