//! `dockdash logs` — View container logs.

use clap::Args;

use crate::client::ApiClient;

/// Arguments for the `logs` command.
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Container ID.
    pub container: String,
}

/// Executes the `logs` command.
///
/// Retrieves the most recent log lines served by the dashboard.
///
/// # Errors
///
/// Returns an error if the container is unknown or logs are unavailable.
pub async fn execute(server: &str, args: LogsArgs) -> anyhow::Result<()> {
    let client = ApiClient::new(server)?;
    let logs = client.logs(&args.container).await?;

    if logs.is_empty() {
        println!("No logs available for container: {}", args.container);
    } else {
        println!("{logs}");
    }

    Ok(())
}
