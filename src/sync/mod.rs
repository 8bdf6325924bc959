//! Remote record-store synchronization
//!
//! The remote sheet is a best-effort mirror of the in-memory store. Local
//! mutations complete first; a [`SyncTask`] is then queued for a background
//! worker that calls the [`RecordStore`] adapter. A failed remote call is
//! logged and dropped - no retry, no rollback - so local and remote state
//! may diverge until the next startup snapshot load.

pub mod sheet;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{
    error::AppResult,
    models::{Booking, BookingStatus},
};

/// Contract of the remote flat-record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Full snapshot load, used once at startup.
    async fn fetch_all(&self) -> AppResult<Vec<Booking>>;

    /// Append one booking record.
    async fn create(&self, booking: &Booking) -> AppResult<()>;

    /// Partial update of the lifecycle fields of a record.
    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        approved_by: Option<String>,
        returned_at: Option<String>,
    ) -> AppResult<()>;

    /// Remove a record.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// One queued mirror operation.
#[derive(Debug, Clone)]
pub enum SyncTask {
    Create(Box<Booking>),
    UpdateStatus {
        id: String,
        status: BookingStatus,
        approved_by: Option<String>,
        returned_at: Option<String>,
    },
    Delete {
        id: String,
    },
}

/// Cheap cloneable handle used by services to queue mirror operations.
#[derive(Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<SyncTask>,
}

impl SyncHandle {
    /// Queue a task; never blocks the caller. If the worker is gone the
    /// task is dropped with a warning, keeping the local mutation intact.
    pub fn enqueue(&self, task: SyncTask) {
        if self.tx.send(task).is_err() {
            tracing::warn!("sync worker is not running; remote mirror update dropped");
        }
    }
}

/// Start the background sync worker. Returns the handle services use to
/// queue tasks and the worker's join handle.
pub fn spawn_worker(
    store: std::sync::Arc<dyn RecordStore>,
) -> (SyncHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<SyncTask>();
    let worker = tokio::spawn(async move {
        while let Some(task) = rx.recv().await {
            if let Err(e) = run_task(store.as_ref(), &task).await {
                tracing::warn!(error = %e, "remote sync failed; local state kept");
            }
        }
        tracing::debug!("sync channel closed, worker stopping");
    });
    (SyncHandle { tx }, worker)
}

async fn run_task(store: &dyn RecordStore, task: &SyncTask) -> AppResult<()> {
    match task {
        SyncTask::Create(booking) => store.create(booking).await,
        SyncTask::UpdateStatus {
            id,
            status,
            approved_by,
            returned_at,
        } => {
            store
                .update_status(id, *status, approved_by.clone(), returned_at.clone())
                .await
        }
        SyncTask::Delete { id } => store.delete(id).await,
    }
}
