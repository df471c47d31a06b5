//! Background sweep of expired session rows.
//!
//! One task per store. It wakes every `period`, deletes rows whose expiry has
//! passed and goes back to sleep until it is told to stop. Sweep failures are
//! logged and never reach a caller.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::table::Table;

/// Longer periods are clamped so tick deadlines stay representable.
const MAX_PERIOD: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Owned handle on a running cleanup task.
#[derive(Debug)]
pub(crate) struct CleanupTask {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl CleanupTask {
    pub(crate) fn spawn(runtime: &Handle, table: Table, period: Duration) -> Self {
        let (stop, stopped) = oneshot::channel();
        let handle = runtime.spawn(run(table, period, stopped));
        Self { stop, handle }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Signals the loop and waits for it to exit.
    pub(crate) async fn stop(self) {
        // The loop may be gone already (panicked or runtime shut down).
        let _ = self.stop.send(());

        if let Err(e) = self.handle.await {
            if e.is_panic() {
                error!(error = %e, "session cleanup task panicked");
            }
        }
    }
}

async fn run(table: Table, period: Duration, mut stopped: oneshot::Receiver<()>) {
    let period = period.min(MAX_PERIOD);
    // First sweep one full period after start, not immediately.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(period = ?period, "session cleanup started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match table.delete_expired().await {
                    Ok(removed) => debug!(removed, "expired sessions removed"),
                    Err(e) => error!(error = %e, "session cleanup failed"),
                }
            }
            // Resolves on an explicit stop and when every store handle is dropped.
            _ = &mut stopped => {
                debug!("session cleanup stopped");
                return;
            }
        }
    }
}
