//! HTTP client for a running dashboard.

use anyhow::Context;
use dockdash_common::constants::API_PREFIX;
use dockdash_common::types::{ContainerOverview, ErrorResponse, LogsResponse, MessageResponse};
use reqwest::Response;

/// Thin wrapper over the dashboard's JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the dashboard at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches all containers.
    pub async fn containers(&self) -> anyhow::Result<Vec<ContainerOverview>> {
        let response = self.http.get(self.url("/containers")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Starts a container, returning the server's confirmation.
    pub async fn start(&self, id: &str) -> anyhow::Result<String> {
        self.post_action(id, "start").await
    }

    /// Stops a container, returning the server's confirmation.
    pub async fn stop(&self, id: &str) -> anyhow::Result<String> {
        self.post_action(id, "stop").await
    }

    /// Fetches the recent logs of a container.
    pub async fn logs(&self, id: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .get(self.url(&format!("/containers/{id}/logs")))
            .send()
            .await?;
        let body: LogsResponse = check(response).await?.json().await?;
        Ok(body.logs)
    }

    async fn post_action(&self, id: &str, action: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .post(self.url(&format!("/containers/{id}/{action}")))
            .send()
            .await?;
        let body: MessageResponse = check(response).await?.json().await?;
        Ok(body.message)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }
}

/// Turns a non-success response into an error carrying the server message.
async fn check(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorResponse>()
        .await
        .map_or_else(|_| "no error detail".to_string(), |body| body.error);
    anyhow::bail!("dashboard returned {status}: {message}")
}
