//! Cancelable deferred tasks.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;

/// A future scheduled to run once after a delay, cancelable until it runs.
///
/// Dropping the handle does not cancel the task; call [`DeferredTask::cancel`].
#[derive(Debug)]
pub struct DeferredTask {
    handle: AbortHandle,
}

impl DeferredTask {
    /// Spawns `action` on the current tokio runtime, to run after `delay`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn_after<F>(delay: Duration, action: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });
        Self {
            handle: task.abort_handle(),
        }
    }

    /// Cancels the task. Has no effect once the task has completed.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
