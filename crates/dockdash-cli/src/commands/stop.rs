//! `dockdash stop` — Stop a container and drop its timer.

use clap::Args;

use crate::client::ApiClient;

/// Arguments for the `stop` command.
#[derive(Args, Debug)]
pub struct StopArgs {
    /// Container ID.
    pub container: String,
}

/// Executes the `stop` command.
///
/// # Errors
///
/// Returns an error if the dashboard rejects the request.
pub async fn execute(server: &str, args: StopArgs) -> anyhow::Result<()> {
    let client = ApiClient::new(server)?;
    let message = client.stop(&args.container).await?;
    tracing::debug!(id = %args.container, "stop acknowledged");
    println!("{}: {message}", args.container);
    Ok(())
}
