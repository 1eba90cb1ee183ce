//! Background polling of the live root
//!
//! The watcher fingerprints the live subtrees on a fixed interval, on the
//! blocking pool, and reports every change on a channel. The first poll
//! only establishes the baseline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::live::LiveSnapshot;
use crate::manager::ProfileManager;
use crate::{Error, Result};

const CHANNEL_CAPACITY: usize = 16;

/// The live root changed between two polls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveChange {
    pub previous: LiveSnapshot,
    pub current: LiveSnapshot,
}

/// Handle to a running poll task
///
/// Dropping the handle aborts the task.
#[derive(Debug)]
pub struct LiveWatcher {
    handle: Option<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl LiveWatcher {
    /// Start polling `manager`'s live root every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        manager: Arc<ProfileManager>,
        interval: Duration,
    ) -> (Self, mpsc::Receiver<LiveChange>) {
        let (changes_tx, changes_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(poll_loop(manager, interval, changes_tx, shutdown_rx));

        let watcher = Self {
            handle: Some(handle),
            shutdown: shutdown_tx,
        };
        (watcher, changes_rx)
    }

    /// Stop polling and wait for the task to finish.
    pub async fn shutdown(mut self) -> Result<()> {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            handle.await.map_err(|e| Error::Task {
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl Drop for LiveWatcher {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn poll_loop(
    manager: Arc<ProfileManager>,
    interval: Duration,
    changes: mpsc::Sender<LiveChange>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last: Option<LiveSnapshot> = None;

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }

        let polled = Arc::clone(&manager);
        let snapshot = match tokio::task::spawn_blocking(move || polled.live_snapshot()).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(%error, "live root poll failed");
                continue;
            }
        };

        if let Some(previous) = last.replace(snapshot.clone())
            && previous != snapshot
        {
            tracing::debug!("live root changed");
            let change = LiveChange {
                previous,
                current: snapshot,
            };
            if changes.send(change).await.is_err() {
                break;
            }
        }
    }
    tracing::debug!("live root watcher stopped");
}
