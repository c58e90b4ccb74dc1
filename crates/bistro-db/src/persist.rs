//! # Snapshot Persister
//!
//! One background task owns every write of the store snapshot. Store
//! actions hand it the serialized state and move on.
//!
//! ## Persister Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Persister Flow                                    │
//! │                                                                         │
//! │  dispatch #1 ──┐                                                        │
//! │  dispatch #2 ──┼──► PersistHandle::save(json)   (never blocks)         │
//! │  dispatch #3 ──┘          │                                             │
//! │                           ▼  unbounded mpsc                             │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Persister::run                              │   │
//! │  │                                                                 │   │
//! │  │  1. recv Save(json)                                            │   │
//! │  │  2. drain queued Saves, keep the newest (older ones are stale) │   │
//! │  │  3. set_item("restaurant-storage", newest)                     │   │
//! │  │  4. on error: log + error hook (store sets its error string)   │   │
//! │  │                                                                 │   │
//! │  │  Flush(ack)    → reply once everything before it is written    │   │
//! │  │  Shutdown(ack) → reply and exit                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  No retry, no backpressure. A failed write is superseded by the next. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::local_storage::LocalStorageRepository;
use crate::snapshot;

/// Callback invoked with every failed write.
pub type ErrorHook = Arc<dyn Fn(&DbError) + Send + Sync>;

enum PersistRequest {
    Save(String),
    Flush(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

// =============================================================================
// Persister
// =============================================================================

/// Background writer for store snapshots.
pub struct Persister {
    repo: LocalStorageRepository,
    rx: mpsc::UnboundedReceiver<PersistRequest>,
    on_error: Option<ErrorHook>,
    writes: u64,
}

/// Cheap, cloneable handle for queuing snapshots.
#[derive(Clone)]
pub struct PersistHandle {
    tx: mpsc::UnboundedSender<PersistRequest>,
}

impl std::fmt::Debug for PersistHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistHandle")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl Persister {
    /// Creates a persister writing through `repo` and its handle.
    pub fn new(repo: LocalStorageRepository) -> (Self, PersistHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let persister = Persister {
            repo,
            rx,
            on_error: None,
            writes: 0,
        };
        (persister, PersistHandle { tx })
    }

    /// Registers a callback for failed writes.
    pub fn on_error(mut self, hook: impl Fn(&DbError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Spawns [`Persister::run`] on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        info!("Snapshot persister starting");

        while let Some(request) = self.rx.recv().await {
            let flow = match request {
                PersistRequest::Save(json) => self.save_newest(json).await,
                control => Self::control(control),
            };
            if flow.is_break() {
                break;
            }
        }

        info!(writes = self.writes, "Snapshot persister stopped");
    }

    /// Writes the newest of the queued snapshots, then handles the control
    /// request that interrupted the drain, if any.
    async fn save_newest(&mut self, first: String) -> ControlFlow<()> {
        let mut latest = first;
        let mut superseded = 0usize;
        let mut interrupted_by = None;

        while let Ok(next) = self.rx.try_recv() {
            match next {
                PersistRequest::Save(newer) => {
                    latest = newer;
                    superseded += 1;
                }
                control => {
                    interrupted_by = Some(control);
                    break;
                }
            }
        }

        self.write(&latest, superseded).await;

        match interrupted_by {
            Some(control) => Self::control(control),
            None => ControlFlow::Continue(()),
        }
    }

    async fn write(&mut self, json: &str, superseded: usize) {
        match snapshot::save_raw(&self.repo, json).await {
            Ok(()) => {
                self.writes += 1;
                debug!(bytes = json.len(), superseded, "Store snapshot persisted");
            }
            Err(e) => {
                error!(error = %e, "Failed to persist store snapshot");
                if let Some(hook) = &self.on_error {
                    hook(&e);
                }
            }
        }
    }

    fn control(request: PersistRequest) -> ControlFlow<()> {
        match request {
            PersistRequest::Flush(ack) => {
                let _ = ack.send(());
                ControlFlow::Continue(())
            }
            PersistRequest::Shutdown(ack) => {
                info!("Snapshot persister shutting down");
                let _ = ack.send(());
                ControlFlow::Break(())
            }
            PersistRequest::Save(_) => ControlFlow::Continue(()),
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

impl PersistHandle {
    /// Queues a serialized snapshot. Fire-and-forget.
    pub fn save(&self, json: String) {
        if self.tx.send(PersistRequest::Save(json)).is_err() {
            warn!("Snapshot dropped: persister is not running");
        }
    }

    /// Waits until every snapshot queued before this call is written.
    pub async fn flush(&self) -> DbResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(PersistRequest::Flush(ack_tx))
            .map_err(|_| DbError::PersisterStopped)?;
        ack_rx.await.map_err(|_| DbError::PersisterStopped)
    }

    /// Writes what is queued, then stops the persister.
    pub async fn shutdown(&self) -> DbResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(PersistRequest::Shutdown(ack_tx))
            .map_err(|_| DbError::PersisterStopped)?;
        ack_rx.await.map_err(|_| DbError::PersisterStopped)
    }

    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use bistro_core::STORAGE_KEY;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_flush_writes_snapshot() {
        let db = db().await;
        let (persister, handle) = Persister::new(db.local_storage());
        persister.spawn();

        handle.save("{\"cart\":[]}".to_string());
        handle.flush().await.unwrap();

        let stored = db.local_storage().get_item(STORAGE_KEY).await.unwrap();
        assert_eq!(stored.as_deref(), Some("{\"cart\":[]}"));
    }

    #[tokio::test]
    async fn test_newest_snapshot_wins() {
        let db = db().await;
        let (persister, handle) = Persister::new(db.local_storage());

        // Queue before the task starts so the saves coalesce.
        for i in 0..50 {
            handle.save(format!("{{\"n\":{}}}", i));
        }
        persister.spawn();
        handle.flush().await.unwrap();

        let stored = db.local_storage().get_item(STORAGE_KEY).await.unwrap();
        assert_eq!(stored.as_deref(), Some("{\"n\":49}"));
    }

    #[tokio::test]
    async fn test_write_failure_reaches_hook() {
        let db = db().await;
        let failures = Arc::new(AtomicUsize::new(0));
        let seen = failures.clone();
        let (persister, handle) = Persister::new(db.local_storage());
        persister
            .on_error(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .spawn();

        db.close().await;
        handle.save("{}".to_string());
        handle.flush().await.unwrap();

        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_stops_task() {
        let db = db().await;
        let (persister, handle) = Persister::new(db.local_storage());
        let task = persister.spawn();

        handle.save("{}".to_string());
        handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert!(!handle.is_running());
        assert!(handle.flush().await.is_err());
        assert!(db.local_storage().get_item(STORAGE_KEY).await.unwrap().is_some());
    }
}
