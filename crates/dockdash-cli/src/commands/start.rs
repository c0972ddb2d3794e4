//! `dockdash start` — Start a container through the dashboard.

use clap::Args;

use crate::client::ApiClient;

/// Arguments for the `start` command.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Container ID.
    pub container: String,
}

/// Executes the `start` command.
///
/// # Errors
///
/// Returns an error if the dashboard rejects the request.
pub async fn execute(server: &str, args: StartArgs) -> anyhow::Result<()> {
    let client = ApiClient::new(server)?;
    let message = client.start(&args.container).await?;
    println!("{}: {message}", args.container);
    Ok(())
}
