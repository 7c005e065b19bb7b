//! Live entry snapshot cache.
//!
//! One spawned task owns the subscription: it consumes store events,
//! normalizes each full snapshot, and publishes it over a watch channel.
//! Consumers read the latest snapshot synchronously and recompute their
//! aggregates and pages over it without ever awaiting I/O. When the
//! subscription itself fails, the cache freezes on the last-known-good
//! entries and marks the snapshot stale instead of crashing.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use crate::core::normalize;
use crate::entities::BudgetEntry;
use crate::store::StoreEvent;

/// The cache's view of the ledger at one point in time.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    /// All entries, normalized, newest-created-first. Shared immutably -
    /// consumers must never mutate the snapshot, only replace it wholesale
    /// when the next one arrives.
    pub entries: Arc<Vec<BudgetEntry>>,
    /// `Some(message)` when the subscription has failed and these entries
    /// are the last-known-good data. The UI decides whether to surface it.
    pub stale: Option<String>,
}

/// Live feed of ledger snapshots, backed by one subscription task.
#[derive(Debug)]
pub struct EntryFeed {
    rx: watch::Receiver<LedgerSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl EntryFeed {
    /// Spawns the subscription task over a store event stream.
    pub(crate) fn spawn(mut events: UnboundedReceiver<StoreEvent>) -> Self {
        let (tx, rx) = watch::channel(LedgerSnapshot::default());

        let task = tokio::spawn(async move {
            let mut last: Arc<Vec<BudgetEntry>> = Arc::new(Vec::new());

            while let Some(event) = events.recv().await {
                let snapshot = match event {
                    StoreEvent::Snapshot(docs) => {
                        let mut entries: Vec<BudgetEntry> =
                            docs.iter().map(normalize::normalize_document).collect();
                        // The store promises newest-first; re-sorting here
                        // makes it a guarantee of this feed rather than a
                        // hope about the transport.
                        entries.sort_by(|a, b| {
                            b.created_at
                                .cmp(&a.created_at)
                                .then_with(|| b.id.cmp(&a.id))
                        });
                        last = Arc::new(entries);
                        trace!("ledger cache refreshed with {} entries", last.len());

                        LedgerSnapshot {
                            entries: Arc::clone(&last),
                            stale: None,
                        }
                    }
                    StoreEvent::Error(message) => {
                        warn!("entry subscription failed, keeping last-known-good data: {message}");
                        LedgerSnapshot {
                            entries: Arc::clone(&last),
                            stale: Some(message),
                        }
                    }
                };

                if tx.send(snapshot).is_err() {
                    break; // feed dropped, nobody is listening
                }
            }
        });

        Self {
            rx,
            task: Some(task),
        }
    }

    /// The latest snapshot. Cheap to call; clones an `Arc` and a flag.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.rx.borrow().clone()
    }

    /// Waits for the next snapshot (including the initial one delivered on
    /// subscribe). Returns `false` once the feed is unsubscribed.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Stops the subscription task. Idempotent: calling it twice (or after
    /// drop ordering already stopped the task) is a no-op. The last
    /// snapshot remains readable.
    pub fn unsubscribe(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            trace!("entry feed unsubscribed");
        }
    }
}

impl Drop for EntryFeed {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
