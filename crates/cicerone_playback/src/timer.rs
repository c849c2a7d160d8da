//! Cancelable timer handles.
//!
//! Every timer the engine uses (autoplay interval, title auto-dismiss) is a
//! spawned task whose abort handle is stored in navigator state and cancelled
//! on any state transition that invalidates it. Timers are never left to
//! expire on their own as cleanup.

use std::future::Future;
use tokio::task::AbortHandle;

/// Handle to a spawned timer task. Aborting is idempotent; dropping the
/// handle aborts the task.
#[derive(Debug)]
pub(crate) struct TimerHandle {
    handle: AbortHandle,
}

impl TimerHandle {
    /// Spawn a timer task on the current runtime.
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future).abort_handle(),
        }
    }

    /// Cancel the timer. The task stops at its next suspension point and
    /// never fires afterwards.
    pub(crate) fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
