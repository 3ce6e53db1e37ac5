//! Persistence worker: debounced background saves of replacement documents.
//!
//! DESIGN
//! ======
//! The canvas emits a full replacement document on every label-drag frame,
//! so saves are coalesced. Documents go through a bounded queue; the worker
//! keeps only the newest pending one and writes it once the queue has been
//! quiet for the debounce interval, and once more when the queue closes.
//!
//! ERROR HANDLING
//! ==============
//! A pending document is dropped only after a successful write. A failed save
//! is logged and retried on the next quiet interval. A failure during the
//! final flush is logged and counted; there is no later attempt.

use std::sync::Arc;
use std::time::Duration;

use geocanvas::doc::GeometryDocument;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::env_parse;
use crate::store::DocumentStore;

pub const DEFAULT_PERSIST_DEBOUNCE_MS: u64 = 250;
pub const DEFAULT_PERSIST_QUEUE_CAPACITY: usize = 256;

/// Tuning knobs for the persistence worker, loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistConfig {
    /// Quiet period before the newest pending document is written.
    pub debounce_ms: u64,
    /// Bounded channel capacity.
    pub queue_capacity: usize,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self { debounce_ms: DEFAULT_PERSIST_DEBOUNCE_MS, queue_capacity: DEFAULT_PERSIST_QUEUE_CAPACITY }
    }
}

impl PersistConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            debounce_ms: env_parse("GEOTUTOR_PERSIST_DEBOUNCE_MS", DEFAULT_PERSIST_DEBOUNCE_MS),
            queue_capacity: env_parse("GEOTUTOR_PERSIST_QUEUE_CAPACITY", DEFAULT_PERSIST_QUEUE_CAPACITY).max(1),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("persistence worker stopped unexpectedly: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// What the worker did over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistStats {
    /// Documents received.
    pub received: usize,
    /// Successful writes.
    pub saved: usize,
    /// Documents replaced by a newer one before being written.
    pub coalesced: usize,
    /// Failed writes.
    pub failed: usize,
}

/// Sending side of a running persistence worker.
pub struct PersistHandle {
    tx: mpsc::Sender<GeometryDocument>,
    task: JoinHandle<PersistStats>,
}

impl PersistHandle {
    /// Queue a replacement document. Waits while the queue is full.
    ///
    /// Returns false if the worker is gone.
    pub async fn enqueue(&self, doc: GeometryDocument) -> bool {
        if self.tx.send(doc).await.is_err() {
            warn!("persistence queue closed; dropping document");
            return false;
        }
        true
    }

    /// Close the queue, wait for the final flush, and report.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Join`] if the worker task panicked or was cancelled.
    pub async fn close(self) -> Result<PersistStats, PersistError> {
        drop(self.tx);
        Ok(self.task.await?)
    }
}

/// Spawn a debounced persistence worker writing to `key` in `store`.
pub fn spawn_persistence_worker<S: DocumentStore>(store: Arc<S>, key: String, config: PersistConfig) -> PersistHandle {
    let (tx, mut rx) = mpsc::channel::<GeometryDocument>(config.queue_capacity.max(1));
    let debounce = Duration::from_millis(config.debounce_ms);

    info!(key = %key, debounce_ms = config.debounce_ms, queue_capacity = config.queue_capacity, "persistence worker configured");

    let task = tokio::spawn(async move {
        let mut pending: Option<GeometryDocument> = None;
        let mut stats = PersistStats::default();

        loop {
            tokio::select! {
                maybe_doc = rx.recv() => {
                    let Some(doc) = maybe_doc else {
                        flush(store.as_ref(), &key, &mut pending, &mut stats).await;
                        break;
                    };
                    stats.received += 1;
                    if pending.replace(doc).is_some() {
                        stats.coalesced += 1;
                    }
                }
                () = tokio::time::sleep(debounce), if pending.is_some() => {
                    flush(store.as_ref(), &key, &mut pending, &mut stats).await;
                }
            }
        }

        info!(key = %key, saved = stats.saved, coalesced = stats.coalesced, failed = stats.failed, "persistence worker stopped");
        stats
    });

    PersistHandle { tx, task }
}

async fn flush<S: DocumentStore>(
    store: &S,
    key: &str,
    pending: &mut Option<GeometryDocument>,
    stats: &mut PersistStats,
) {
    let Some(doc) = pending.as_ref() else {
        return;
    };
    match store.save(key, doc).await {
        Ok(()) => {
            stats.saved += 1;
            *pending = None;
        }
        Err(e) => {
            stats.failed += 1;
            error!(error = %e, key, "document save failed");
        }
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
