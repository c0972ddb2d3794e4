//! Runtime engine that pairs the container backend with the auto-stop
//! registry.

use std::collections::BTreeSet;
use std::time::Duration;

use dockdash_common::constants::DEFAULT_LOG_TAIL;
use dockdash_common::error::Result;
use dockdash_common::types::{ContainerId, ContainerOverview};

use crate::autostop::AutoStopRegistry;
use crate::backend::SharedBackend;

/// The runtime engine that coordinates all dashboard operations.
///
/// Engine calls are the only operations that await; the registry
/// bookkeeping around them is synchronous.
#[derive(Clone)]
pub struct Engine {
    backend: SharedBackend,
    autostop: AutoStopRegistry,
    log_tail: usize,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("autostop", &self.autostop)
            .field("log_tail", &self.log_tail)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine whose started containers are stopped after
    /// `idle_budget`.
    #[must_use]
    pub fn new(backend: SharedBackend, idle_budget: Duration) -> Self {
        let autostop = AutoStopRegistry::new(backend.clone(), idle_budget);
        Self {
            backend,
            autostop,
            log_tail: DEFAULT_LOG_TAIL,
        }
    }

    /// Sets how many trailing log lines [`Engine::logs`] returns.
    #[must_use]
    pub const fn with_log_tail(mut self, log_tail: usize) -> Self {
        self.log_tail = log_tail;
        self
    }

    /// Lists every container with its remaining auto-stop time.
    ///
    /// Running containers without a timer (started before this process or
    /// outside the dashboard) are scheduled as a side effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend listing fails.
    pub async fn overview(&self) -> Result<Vec<ContainerOverview>> {
        let containers = self.backend.list().await?;

        let running: BTreeSet<&ContainerId> = containers
            .iter()
            .filter(|c| c.is_running())
            .map(|c| &c.id)
            .collect();
        let adopted = self.autostop.reconcile(running);
        if !adopted.is_empty() {
            tracing::debug!(count = adopted.len(), "running containers adopted");
        }

        Ok(containers
            .into_iter()
            .map(|summary| {
                let remaining = self.autostop.remaining_seconds(&summary.id);
                ContainerOverview::from_summary(summary, remaining)
            })
            .collect())
    }

    /// Starts a container and opens its idle window.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot start the container; no timer
    /// is scheduled in that case.
    pub async fn start(&self, id: &ContainerId) -> Result<()> {
        self.backend.start(id).await?;
        tracing::info!(id = %id, "container started");
        self.autostop.schedule(id);
        Ok(())
    }

    /// Stops a container and drops its timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot stop the container; the timer
    /// is kept in that case.
    pub async fn stop(&self, id: &ContainerId) -> Result<()> {
        self.backend.stop(id).await?;
        tracing::info!(id = %id, "container stopped");
        let _ = self.autostop.cancel(id);
        Ok(())
    }

    /// Returns the configured number of trailing log lines for a container.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot fetch the logs.
    pub async fn logs(&self, id: &ContainerId) -> Result<String> {
        self.backend.logs(id, self.log_tail).await
    }

    /// Returns the auto-stop registry.
    #[must_use]
    pub const fn autostop(&self) -> &AutoStopRegistry {
        &self.autostop
    }

    /// Returns the number of log lines served per request.
    #[must_use]
    pub const fn log_tail(&self) -> usize {
        self.log_tail
    }
}
