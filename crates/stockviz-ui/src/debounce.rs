use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period the search box waits after the last keystroke.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Cancellable delayed task.
///
/// Each [`schedule`](Debouncer::schedule) aborts the pending timer and starts a
/// new one. When a timer fires, its task is spawned on its own, so a later
/// `schedule` or `cancel` only stops timers that have not fired yet; work that
/// already started runs to completion.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        }));
    }

    /// Abort the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// `true` while a timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
