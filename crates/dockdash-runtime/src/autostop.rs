//! Idle auto-stop registry.
//!
//! Every container started through the dashboard, or found running during
//! a listing, gets one entry here: the instant its idle window opened and a
//! [`DeferredTask`] that stops it once the window closes. The registry owns
//! those tasks exclusively; nothing else cancels or fires them.
//!
//! Each entry carries a generation number. A firing task re-checks its
//! generation under the write lock before touching the engine and again
//! before removing the entry, so a task that lost a race against `cancel`
//! or a reschedule never stops a container on behalf of a newer entry and
//! never removes one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use std::time::Duration;

use dockdash_common::constants::DEFAULT_IDLE_BUDGET_SECS;
use dockdash_common::types::ContainerId;
use tokio::time::Instant;

use crate::backend::SharedBackend;
use crate::timer::DeferredTask;

const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Debug)]
struct TimerEntry {
    started_at: Instant,
    generation: u64,
    task: DeferredTask,
    firing: bool,
}

impl TimerEntry {
    /// Cancels the pending stop. A stop that is already running is left to
    /// complete; its generation check keeps it from touching newer entries.
    fn release(&self) {
        if !self.firing {
            self.task.cancel();
        }
    }
}

struct Inner {
    backend: SharedBackend,
    budget: Duration,
    entries: RwLock<HashMap<ContainerId, TimerEntry>>,
    next_generation: AtomicU64,
}

impl Inner {
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ContainerId, TimerEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ContainerId, TimerEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the entry for a firing task. Returns `false` if the entry was
    /// canceled or replaced since the task was scheduled.
    fn begin_firing(&self, id: &ContainerId, generation: u64) -> bool {
        match self.write().get_mut(id) {
            Some(entry) if entry.generation == generation => {
                entry.firing = true;
                true
            }
            _ => false,
        }
    }

    /// Removes the entry if it still belongs to `generation`.
    fn finish_firing(&self, id: &ContainerId, generation: u64) {
        let mut entries = self.write();
        if entries.get(id).is_some_and(|e| e.generation == generation) {
            let _ = entries.remove(id);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let entries = self.entries.get_mut().unwrap_or_else(PoisonError::into_inner);
        for entry in entries.values() {
            entry.release();
        }
    }
}

/// Tracks running containers and stops each one after its idle budget.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone)]
pub struct AutoStopRegistry {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for AutoStopRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoStopRegistry")
            .field("budget", &self.inner.budget)
            .field("tracked", &self.tracked_count())
            .finish_non_exhaustive()
    }
}

impl AutoStopRegistry {
    /// Creates an empty registry that stops containers through `backend`
    /// once `budget` has elapsed.
    #[must_use]
    pub fn new(backend: SharedBackend, budget: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                budget,
                entries: RwLock::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Creates a registry with the default five minute budget.
    #[must_use]
    pub fn with_default_budget(backend: SharedBackend) -> Self {
        Self::new(backend, Duration::from_secs(DEFAULT_IDLE_BUDGET_SECS))
    }

    /// Returns the idle budget granted to each container.
    #[must_use]
    pub fn idle_budget(&self) -> Duration {
        self.inner.budget
    }

    /// Starts a fresh idle window for `id`, replacing any pending one.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn schedule(&self, id: &ContainerId) {
        let mut entries = self.inner.write();
        self.install(&mut entries, id);
    }

    /// Stops tracking `id`. Returns whether an entry was removed.
    pub fn cancel(&self, id: &ContainerId) -> bool {
        let removed = self.inner.write().remove(id);
        match removed {
            Some(entry) => {
                entry.release();
                tracing::info!(id = %id, "auto-stop canceled");
                true
            }
            None => false,
        }
    }

    /// Whole seconds left before `id` is stopped, rounded up.
    ///
    /// Returns `None` when `id` is not tracked and `Some(0)` once the window
    /// has closed but the stop has not completed yet.
    #[must_use]
    pub fn remaining_seconds(&self, id: &ContainerId) -> Option<u64> {
        let entries = self.inner.read();
        let entry = entries.get(id)?;
        Some(remaining_secs(self.inner.budget, entry.started_at.elapsed()))
    }

    /// Schedules every id in `running` that is not tracked yet.
    ///
    /// Entries for ids outside `running` are left alone. Returns the ids
    /// that were newly scheduled.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn reconcile<'a, I>(&self, running: I) -> Vec<ContainerId>
    where
        I: IntoIterator<Item = &'a ContainerId>,
    {
        let mut entries = self.inner.write();
        let mut adopted = Vec::new();
        for id in running {
            if entries.contains_key(id) {
                continue;
            }
            tracing::info!(id = %id, "tracking container that was already running");
            self.install(&mut entries, id);
            adopted.push(id.clone());
        }
        adopted
    }

    /// Returns whether `id` currently has an entry.
    #[must_use]
    pub fn is_tracked(&self, id: &ContainerId) -> bool {
        self.inner.read().contains_key(id)
    }

    /// Number of tracked containers.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.inner.read().len()
    }

    /// Cancels every pending stop and clears the registry.
    ///
    /// Returns the number of entries dropped.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.inner.write().drain().collect();
        for (_, entry) in &drained {
            entry.release();
        }
        if !drained.is_empty() {
            tracing::info!(count = drained.len(), "all auto-stop timers canceled");
        }
        drained.len()
    }

    fn install(&self, entries: &mut HashMap<ContainerId, TimerEntry>, id: &ContainerId) {
        if let Some(previous) = entries.remove(id) {
            previous.release();
            tracing::debug!(id = %id, "previous auto-stop replaced");
        }

        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let registry = Arc::downgrade(&self.inner);
        let task_id = id.clone();
        let task = DeferredTask::spawn_after(self.inner.budget, async move {
            stop_on_timeout(registry, task_id, generation).await;
        });

        let _ = entries.insert(
            id.clone(),
            TimerEntry {
                started_at: Instant::now(),
                generation,
                task,
                firing: false,
            },
        );
        tracing::info!(
            id = %id,
            budget_secs = self.inner.budget.as_secs(),
            "auto-stop scheduled"
        );
    }
}

/// Runs when an idle window closes: stops the container once, logs the
/// outcome, and drops the entry whether or not the stop succeeded.
async fn stop_on_timeout(registry: Weak<Inner>, id: ContainerId, generation: u64) {
    let Some(inner) = registry.upgrade() else {
        return;
    };
    if !inner.begin_firing(&id, generation) {
        tracing::debug!(id = %id, generation, "stale auto-stop skipped");
        return;
    }

    match inner.backend.stop(&id).await {
        Ok(()) => tracing::info!(
            id = %id,
            idle_secs = inner.budget.as_secs(),
            "container stopped after idle budget"
        ),
        Err(e) => tracing::error!(
            id = %id,
            error = %e,
            "auto-stop failed; container is no longer tracked"
        ),
    }

    inner.finish_firing(&id, generation);
}

fn remaining_secs(budget: Duration, elapsed: Duration) -> u64 {
    let left = budget.saturating_sub(elapsed);
    u64::try_from(left.as_nanos().div_ceil(NANOS_PER_SEC)).unwrap_or(u64::MAX)
}
