//! Process-local container backend.
//!
//! Keeps a list of fake containers with Docker-like status text. Used by
//! `dockdash serve --demo` to run the dashboard without an engine, and by
//! the test suites to observe exactly which engine calls were made.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dockdash_common::constants::DEFAULT_LOG_TAIL;
use dockdash_common::error::{DashError, Result};
use dockdash_common::types::{ContainerId, ContainerSummary};

use super::ContainerBackend;
use crate::logs::{tail_lines, timestamped_line};

/// Log lines kept per container; older lines are discarded.
pub const LOG_CAPACITY: usize = 4 * DEFAULT_LOG_TAIL;

/// Engine operations, used to count calls and inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `list`
    List,
    /// `start`
    Start,
    /// `stop`
    Stop,
    /// `logs`
    Logs,
}

impl Operation {
    const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Logs => "logs",
        }
    }
}

#[derive(Debug)]
struct MemoryContainer {
    id: ContainerId,
    name: String,
    image: String,
    running: bool,
    ever_started: bool,
    logs: Vec<String>,
}

impl MemoryContainer {
    fn status(&self) -> String {
        if self.running {
            "Up Less than a second".to_string()
        } else if self.ever_started {
            "Exited (0) Less than a second ago".to_string()
        } else {
            "Created".to_string()
        }
    }

    fn summary(&self) -> ContainerSummary {
        ContainerSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            status: self.status(),
            image: self.image.clone(),
        }
    }

    fn log(&mut self, message: &str) {
        self.logs.push(timestamped_line(chrono::Utc::now(), message));
        let excess = self.logs.len().saturating_sub(LOG_CAPACITY);
        if excess > 0 {
            let _ = self.logs.drain(..excess);
        }
    }
}

#[derive(Debug, Default)]
struct State {
    containers: Vec<MemoryContainer>,
    calls: HashMap<(Operation, Option<ContainerId>), usize>,
    failing: HashSet<Operation>,
}

impl State {
    fn record(&mut self, op: Operation, id: Option<&ContainerId>) -> Result<()> {
        *self.calls.entry((op, id.cloned())).or_default() += 1;
        if self.failing.contains(&op) {
            return Err(DashError::operation(
                op.name(),
                id.map_or("*", ContainerId::as_str),
                "injected failure",
            ));
        }
        Ok(())
    }

    fn container_mut(&mut self, id: &ContainerId) -> Result<&mut MemoryContainer> {
        self.containers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| DashError::unknown_container(id.as_str()))
    }
}

/// In-memory [`ContainerBackend`].
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend preloaded with a handful of stopped containers.
    #[must_use]
    pub fn demo() -> Self {
        let backend = Self::new();
        backend.add_container("demo-web", "web", "nginx:alpine", false);
        backend.add_container("demo-cache", "cache", "redis:7", false);
        backend.add_container("demo-db", "db", "postgres:16", true);
        backend
    }

    /// Registers a container. An existing container with the same id is
    /// replaced.
    pub fn add_container(
        &self,
        id: impl Into<ContainerId>,
        name: impl Into<String>,
        image: impl Into<String>,
        running: bool,
    ) {
        let id = id.into();
        let mut state = self.lock();
        state.containers.retain(|c| c.id != id);
        let mut container = MemoryContainer {
            id,
            name: name.into(),
            image: image.into(),
            running,
            ever_started: running,
            logs: Vec::new(),
        };
        if running {
            container.log("container started");
        }
        state.containers.push(container);
    }

    /// Appends a log line to a container.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::NotFound`] if the container is unknown.
    pub fn push_log(&self, id: &ContainerId, message: &str) -> Result<()> {
        self.lock().container_mut(id)?.log(message);
        Ok(())
    }

    /// Makes every subsequent call of `op` fail.
    pub fn fail(&self, op: Operation) {
        let _ = self.lock().failing.insert(op);
    }

    /// Lets `op` succeed again.
    pub fn recover(&self, op: Operation) {
        let _ = self.lock().failing.remove(&op);
    }

    /// Number of `op` calls received for `id`, failed ones included.
    #[must_use]
    pub fn calls(&self, op: Operation, id: &ContainerId) -> usize {
        self.lock()
            .calls
            .get(&(op, Some(id.clone())))
            .copied()
            .unwrap_or(0)
    }

    /// Number of `list` calls received.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.lock()
            .calls
            .get(&(Operation::List, None))
            .copied()
            .unwrap_or(0)
    }

    /// Returns whether the container is currently running.
    #[must_use]
    pub fn is_running(&self, id: &ContainerId) -> bool {
        self.lock()
            .containers
            .iter()
            .any(|c| &c.id == id && c.running)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ContainerBackend for InMemoryBackend {
    async fn list(&self) -> Result<Vec<ContainerSummary>> {
        let mut state = self.lock();
        state.record(Operation::List, None)?;
        Ok(state.containers.iter().map(MemoryContainer::summary).collect())
    }

    async fn start(&self, id: &ContainerId) -> Result<()> {
        let mut state = self.lock();
        state.record(Operation::Start, Some(id))?;
        let container = state.container_mut(id)?;
        if !container.running {
            container.running = true;
            container.ever_started = true;
            container.log("container started");
        }
        Ok(())
    }

    async fn stop(&self, id: &ContainerId) -> Result<()> {
        let mut state = self.lock();
        state.record(Operation::Stop, Some(id))?;
        let container = state.container_mut(id)?;
        if container.running {
            container.running = false;
            container.log("container stopped");
        }
        Ok(())
    }

    async fn logs(&self, id: &ContainerId, tail: usize) -> Result<String> {
        let mut state = self.lock();
        state.record(Operation::Logs, Some(id))?;
        let container = state.container_mut(id)?;
        Ok(tail_lines(&container.logs, tail).join("\n"))
    }
}
