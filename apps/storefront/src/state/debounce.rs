//! # Query Debouncer
//!
//! Turns a burst of raw search-box values into a single settled value.
//!
//! ## Timeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  raw:      "r"   "ro"  "rob"                                            │
//! │             │     │     │                                               │
//! │  timer:     ├──x  ├──x  ├────────── 350 ms ──────────┐                  │
//! │             (reset on every new value)               │                  │
//! │                                                      ▼                  │
//! │  settled:                                          "rob"                │
//! │                                                                         │
//! │  Last write wins. Cancel or drop discards the pending value.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Commands accepted by the debounce task.
#[derive(Debug)]
enum DebounceCommand<T> {
    /// A new raw value and its generation; restarts the quiet interval.
    Push(u64, T),

    /// Forget the pending value, if any.
    Cancel,
}

/// Debounces values pushed from synchronous code.
///
/// Every push and cancel bumps a generation counter. A settled value is
/// only handed out if no newer push or cancel happened in the meantime, so
/// values already queued by the task never override later input.
///
/// Must be created inside a tokio runtime. The background task stops when
/// the debouncer is dropped.
#[derive(Debug)]
pub struct Debouncer<T> {
    cmd_tx: mpsc::UnboundedSender<DebounceCommand<T>>,
    settled_rx: mpsc::UnboundedReceiver<(u64, T)>,
    task: JoinHandle<()>,
    generation: u64,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce task.
    pub fn new(delay: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(cmd_rx, settled_tx, delay));

        Debouncer {
            cmd_tx,
            settled_rx,
            task,
            generation: 0,
        }
    }

    /// Records a raw value.
    pub fn push(&mut self, value: T) {
        self.generation += 1;
        // The task only exits once this sender is gone.
        let _ = self.cmd_tx.send(DebounceCommand::Push(self.generation, value));
    }

    /// Discards the pending value, including one that already settled but
    /// was not read yet.
    pub fn cancel(&mut self) {
        self.generation += 1;
        let _ = self.cmd_tx.send(DebounceCommand::Cancel);
    }

    /// Waits for the next settled value.
    ///
    /// Cancel safe. Returns `None` only if the task has stopped.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            let (generation, value) = self.settled_rx.recv().await?;
            if generation == self.generation {
                return Some(value);
            }
            trace!(generation, latest = self.generation, "Superseded value dropped");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Debounce loop: hold the latest value until the channel stays quiet for
/// `delay`, then emit it with its generation.
async fn run<T>(
    mut cmd_rx: mpsc::UnboundedReceiver<DebounceCommand<T>>,
    settled_tx: mpsc::UnboundedSender<(u64, T)>,
    delay: Duration,
) {
    let mut pending: Option<(u64, T)> = None;

    loop {
        let Some(entry) = pending.take() else {
            match cmd_rx.recv().await {
                Some(DebounceCommand::Push(generation, value)) => pending = Some((generation, value)),
                Some(DebounceCommand::Cancel) => {}
                None => return,
            }
            continue;
        };

        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(DebounceCommand::Push(generation, newer)) => {
                    trace!("Debounce interval restarted");
                    pending = Some((generation, newer));
                }
                Some(DebounceCommand::Cancel) => trace!("Pending value cancelled"),
                None => return,
            },
            _ = tokio::time::sleep(delay) => {
                if settled_tx.send(entry).is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::{timeout, Instant};

    const DELAY: Duration = Duration::from_millis(350);

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_once_with_last_value() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();

        debouncer.push("r");
        debouncer.push("ro");
        debouncer.push("rob");

        assert_eq!(debouncer.next().await, Some("rob"));
        assert!(start.elapsed() >= DELAY);

        // Nothing else is pending.
        assert!(timeout(Duration::from_secs(5), debouncer.next()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_value_restarts_interval() {
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push("so".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.push("sofa".to_string());
        let pushed_at = Instant::now();

        assert_eq!(debouncer.next().await.as_deref(), Some("sofa"));
        assert!(pushed_at.elapsed() >= DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_values_each_settle() {
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push(1);
        assert_eq!(debouncer.next().await, Some(1));

        debouncer.push(2);
        assert_eq!(debouncer.next().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push("mesa");
        debouncer.cancel();

        assert!(timeout(Duration::from_secs(5), debouncer.next()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_already_settled_value() {
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push("sofa");
        // Settles inside the task, nobody reads it yet.
        tokio::time::sleep(DELAY * 2).await;
        debouncer.cancel();

        assert!(timeout(Duration::from_secs(5), debouncer.next()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_push_supersedes_settled_value() {
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push("s");
        tokio::time::sleep(DELAY * 2).await;
        debouncer.push("mesa");

        assert_eq!(debouncer.next().await, Some("mesa"));
        assert!(timeout(Duration::from_secs(5), debouncer.next()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_pending_value() {
        let value = Arc::new(());
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push(Arc::clone(&value));
        tokio::task::yield_now().await;
        assert_eq!(Arc::strong_count(&value), 2);

        let start = Instant::now();
        drop(debouncer);
        while Arc::strong_count(&value) > 1 {
            tokio::task::yield_now().await;
        }

        // Released without waiting for the quiet interval to elapse.
        assert!(start.elapsed() < DELAY);
    }
}
