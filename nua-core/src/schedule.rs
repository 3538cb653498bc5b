//! Deferred work for presentation layers.
//!
//! [`DelayedTask`] runs a closure once after a delay and is cancelled when
//! dropped. [`Debouncer`] coalesces bursts of state-changed notifications
//! into a single callback.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

/// A closure scheduled to run once after a delay.
///
/// Dropping the handle cancels the task if it hasn't run yet.
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            f();
        });
        DelayedTask { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Calls `on_settle` once the notifications stop for `window`.
///
/// Dropping the debouncer flushes a pending notification, then stops.
pub struct Debouncer {
    tx: mpsc::UnboundedSender<()>,
}

impl Debouncer {
    /// Must be called from within a tokio runtime.
    pub fn new<F>(window: Duration, mut on_settle: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                loop {
                    match time::timeout(window, rx.recv()).await {
                        // Another change inside the window restarts it
                        Ok(Some(())) => continue,
                        // Sender dropped: flush and stop
                        Ok(None) => {
                            on_settle();
                            return;
                        }
                        Err(_) => break,
                    }
                }
                on_settle();
            }
        });

        Debouncer { tx }
    }

    pub fn notify(&self) {
        // The worker only exits after the sender is gone
        let _ = self.tx.send(());
    }
}
