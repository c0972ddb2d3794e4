//! Docker engine backend built on `bollard`.

use async_trait::async_trait;
use bollard::Docker;
use bollard::container::{
    ListContainersOptions, LogsOptions, StartContainerOptions, StopContainerOptions,
};
use bollard::errors::Error as BollardError;
use dockdash_common::error::{DashError, Result};
use dockdash_common::types::{ContainerId, ContainerSummary};
use futures::TryStreamExt;

use super::ContainerBackend;
use crate::logs::join_log_lines;

/// HTTP status the engine answers with when a container is already in the
/// requested state.
const NOT_MODIFIED: u16 = 304;

/// HTTP status the engine answers with for unknown containers.
const NOT_FOUND: u16 = 404;

/// Backend that drives the local Docker daemon.
#[derive(Debug, Clone)]
pub struct DockerBackend {
    docker: Docker,
}

impl DockerBackend {
    /// Connects using the platform defaults (`DOCKER_HOST` or the local
    /// socket).
    ///
    /// # Errors
    ///
    /// Returns [`DashError::EngineUnavailable`] if the client cannot be built.
    pub fn connect_local() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults().map_err(|e| {
            DashError::EngineUnavailable {
                message: e.to_string(),
            }
        })?;
        tracing::debug!("docker client configured");
        Ok(Self::new(docker))
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn new(docker: Docker) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl ContainerBackend for DockerBackend {
    async fn list(&self) -> Result<Vec<ContainerSummary>> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };
        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(|e| classify("list", "*", e))?;

        let summaries: Vec<_> = containers.into_iter().filter_map(to_summary).collect();
        tracing::debug!(count = summaries.len(), "containers listed");
        Ok(summaries)
    }

    async fn start(&self, id: &ContainerId) -> Result<()> {
        let result = self
            .docker
            .start_container(id.as_str(), None::<StartContainerOptions<String>>)
            .await;
        accept_not_modified("start", id, result)
    }

    async fn stop(&self, id: &ContainerId) -> Result<()> {
        let result = self
            .docker
            .stop_container(id.as_str(), None::<StopContainerOptions>)
            .await;
        accept_not_modified("stop", id, result)
    }

    async fn logs(&self, id: &ContainerId, tail: usize) -> Result<String> {
        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            timestamps: true,
            tail: tail.to_string(),
            ..Default::default()
        };
        let frames: Vec<_> = self
            .docker
            .logs(id.as_str(), Some(options))
            .try_collect()
            .await
            .map_err(|e| classify("logs", id.as_str(), e))?;

        Ok(join_log_lines(frames.iter().map(ToString::to_string)))
    }
}

/// Converts an engine listing row, skipping rows without an identifier.
fn to_summary(container: bollard::models::ContainerSummary) -> Option<ContainerSummary> {
    let id = container.id?;
    let name = container
        .names
        .and_then(|names| names.into_iter().next())
        .map(|name| display_name(&name))
        .unwrap_or_default();
    Some(ContainerSummary {
        id: ContainerId::new(id),
        name,
        status: container.status.unwrap_or_default(),
        image: container.image.unwrap_or_default(),
    })
}

/// Engine names carry a leading `/`; the dashboard shows them without it.
fn display_name(raw: &str) -> String {
    raw.replacen('/', "", 1)
}

/// Treats "already in the requested state" as success, so repeated starts
/// and stops are idempotent.
fn accept_not_modified(
    operation: &'static str,
    id: &ContainerId,
    result: std::result::Result<(), BollardError>,
) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(BollardError::DockerResponseServerError {
            status_code: NOT_MODIFIED,
            ..
        }) => {
            tracing::debug!(id = %id, operation, "container already in requested state");
            Ok(())
        }
        Err(e) => Err(classify(operation, id.as_str(), e)),
    }
}

/// Maps a client error onto the workspace error taxonomy.
fn classify(operation: &'static str, id: &str, err: BollardError) -> DashError {
    match err {
        BollardError::DockerResponseServerError {
            status_code: NOT_FOUND,
            ..
        } => DashError::unknown_container(id),
        BollardError::DockerResponseServerError { message, .. } => {
            DashError::operation(operation, id, message)
        }
        other => DashError::EngineUnavailable {
            message: other.to_string(),
        },
    }
}
