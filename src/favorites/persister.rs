//! Background writer that persists favorites snapshots.
//!
//! Mutations hand a serialized snapshot to the writer over a channel and
//! return immediately. The writer applies snapshots in the order they
//! were sent; a failed write is logged and counted, never retried.

use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::storage::KeyValueStorage;

/// Statistics from the persistence writer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PersistStats {
    pub writes: usize,
    pub failures: usize,
}

pub(crate) struct Persister {
    tx: Option<Sender<String>>,
    handle: Option<JoinHandle<PersistStats>>,
}

impl Persister {
    pub(crate) fn spawn(storage: Arc<dyn KeyValueStorage>, key: &'static str) -> Self {
        let (tx, rx) = channel::<String>();

        let handle = thread::spawn(move || {
            let mut stats = PersistStats::default();
            // Ends once every sender is dropped and the queue is drained.
            for snapshot in rx {
                match storage.save(key, &snapshot) {
                    Ok(()) => {
                        stats.writes += 1;
                        tracing::debug!(key, "favorites persisted");
                    }
                    Err(e) => {
                        stats.failures += 1;
                        tracing::warn!(key, error = %e, "failed to persist favorites");
                    }
                }
            }
            stats
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for writing. Never blocks on the storage.
    pub(crate) fn submit(&self, snapshot: String) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(snapshot).is_err() {
            tracing::warn!("favorites writer has stopped; snapshot dropped");
        }
    }

    /// Close the queue and wait for pending writes.
    pub(crate) fn finish(&mut self) -> PersistStats {
        self.tx.take();
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                tracing::error!("favorites writer panicked");
                PersistStats::default()
            }),
            None => PersistStats::default(),
        }
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        self.finish();
    }
}
