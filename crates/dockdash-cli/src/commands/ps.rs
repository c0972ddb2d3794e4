//! `dockdash ps` — List containers with their auto-stop countdown.

use clap::Args;

use crate::client::ApiClient;
use crate::output;

/// Arguments for the `ps` command.
#[derive(Args, Debug)]
pub struct PsArgs {
    /// Show all containers (including stopped).
    #[arg(short, long)]
    pub all: bool,
}

/// Executes the `ps` command.
///
/// Fetches the container list from the dashboard and prints it as a
/// table.
///
/// # Errors
///
/// Returns an error if the dashboard cannot be reached.
pub async fn execute(server: &str, args: PsArgs) -> anyhow::Result<()> {
    let client = ApiClient::new(server)?;
    let containers = client.containers().await?;

    let filtered: Vec<_> = if args.all {
        containers
    } else {
        containers.into_iter().filter(|c| c.is_running()).collect()
    };

    if filtered.is_empty() {
        println!("No containers found.");
        return Ok(());
    }

    print!("{}", output::container_table(&filtered));
    Ok(())
}
