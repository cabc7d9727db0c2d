//! Trailing-edge debouncing for bursts of calls.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Collapses calls that arrive within `delay` of each other into a single
/// invocation carrying the last value. Each call restarts the window.
///
/// Must be created inside a tokio runtime. Dropping the debouncer (or calling
/// `flush`) delivers any pending value straight away.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, mut callback: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            while let Some(mut pending) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => pending = value,
                            None => break,
                        },
                        _ = tokio::time::sleep(delay) => break,
                    }
                }
                callback(pending);
            }
        });

        Debouncer { tx, task }
    }

    pub fn call(&self, value: T) {
        if self.tx.send(value).is_err() {
            warn!("Debounced call dropped: worker has stopped");
        }
    }

    /// Deliver anything pending now and wait for the callback to finish.
    pub async fn flush(self) {
        let Debouncer { tx, task } = self;
        drop(tx);
        if let Err(e) = task.await {
            warn!("Debounce worker failed: {e}");
        }
    }
}
