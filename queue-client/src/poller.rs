//! Snapshot poller
//!
//! Fetches a complete snapshot right away and then on every tick, and
//! publishes it through a `watch` channel. A failed fetch or a malformed
//! snapshot is logged and the previous snapshot stays published.

use std::sync::Arc;
use std::time::Duration;

use queue_core::Snapshot;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::transport::SnapshotSource;

/// Shortest accepted poll period
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Background task keeping the latest snapshot published
pub struct SnapshotPoller {
    rx: watch::Receiver<Arc<Snapshot>>,
    refresh: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl SnapshotPoller {
    /// Spawn the poll loop on the current runtime
    ///
    /// Runs until `shutdown` is cancelled. Periods below one second are
    /// raised to one second.
    pub fn spawn<S>(source: S, interval: Duration, shutdown: CancellationToken) -> Self
    where
        S: SnapshotSource + 'static,
    {
        let interval = interval.max(MIN_INTERVAL);
        let (tx, rx) = watch::channel(Arc::new(Snapshot::default()));
        let refresh = Arc::new(Notify::new());
        let handle = tokio::spawn(run(source, interval, tx, refresh.clone(), shutdown));
        Self {
            rx,
            refresh,
            handle,
        }
    }

    /// Receiver notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.rx.clone()
    }

    /// Most recently published snapshot (empty until the first fetch succeeds)
    pub fn latest(&self) -> Arc<Snapshot> {
        self.rx.borrow().clone()
    }

    /// Fetch again now instead of waiting for the next tick
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Wait for the poll loop to exit after shutdown
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "Snapshot poller task failed");
        }
    }
}

async fn run<S: SnapshotSource>(
    source: S,
    interval: Duration,
    tx: watch::Sender<Arc<Snapshot>>,
    refresh: Arc<Notify>,
    shutdown: CancellationToken,
) {
    tracing::info!(interval_secs = interval.as_secs(), "Snapshot poller started");

    // first tick fires immediately
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                tracing::info!("Snapshot poller received shutdown signal");
                break;
            }
            _ = refresh.notified() => {
                ticker.reset();
            }
            _ = ticker.tick() => {}
        }

        poll_once(&source, &tx).await;
    }

    tracing::info!("Snapshot poller stopped");
}

async fn poll_once<S: SnapshotSource>(source: &S, tx: &watch::Sender<Arc<Snapshot>>) {
    match source.fetch().await {
        Ok(snapshot) => {
            tracing::debug!(
                tickets = snapshot.tickets().len(),
                tables = snapshot.tables().len(),
                "Snapshot published"
            );
            tx.send_replace(Arc::new(snapshot));
        }
        Err(e) if e.is_transient() => {
            tracing::warn!(error = %e, "Snapshot fetch failed, keeping previous snapshot");
        }
        Err(e) => {
            tracing::error!(code = %e.code(), error = %e, "Snapshot rejected, keeping previous snapshot");
        }
    }
}
