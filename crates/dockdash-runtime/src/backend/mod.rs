//! Container backend abstraction.
//!
//! The dashboard never talks to an engine directly: every listing, start,
//! stop and log fetch goes through a [`ContainerBackend`]. The Docker
//! implementation is the production one; the in-memory implementation backs
//! demo mode and the test suites.

pub mod docker;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use dockdash_common::error::Result;
use dockdash_common::types::{ContainerId, ContainerSummary};

pub use docker::DockerBackend;
pub use memory::InMemoryBackend;

/// Operations the dashboard needs from a container engine.
///
/// All methods are keyed by the engine's container identifier. Implementors
/// must make `stop` on an already-stopped container succeed, since the
/// auto-stop timer and an explicit stop may race for the same container.
#[async_trait]
pub trait ContainerBackend: Send + Sync {
    /// Lists every container known to the engine, running or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be queried.
    async fn list(&self) -> Result<Vec<ContainerSummary>>;

    /// Starts a stopped container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is unknown or cannot be started.
    async fn start(&self, id: &ContainerId) -> Result<()>;

    /// Stops a running container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is unknown or cannot be stopped.
    async fn stop(&self, id: &ContainerId) -> Result<()>;

    /// Returns the last `tail` log lines, timestamped, stdout and stderr
    /// interleaved, joined with newlines.
    ///
    /// # Errors
    ///
    /// Returns an error if logs cannot be retrieved.
    async fn logs(&self, id: &ContainerId, tail: usize) -> Result<String>;
}

/// Shared handle to a backend, as held by the engine and the registry.
pub type SharedBackend = Arc<dyn ContainerBackend>;

/// Connects to the local Docker engine.
///
/// # Errors
///
/// Returns an error if no Docker socket can be configured.
pub fn connect_docker() -> Result<SharedBackend> {
    Ok(Arc::new(DockerBackend::connect_local()?))
}
