// ============================================================================
// OFFLINE SERVICE - persistent queue of failed mutations
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::queue::{ActionQueueRecord, DrainReport, QueuedAction, QUEUE_VERSION};
use crate::services::api_client::ReportApi;
use crate::services::storage::{load_json, save_json, KeyValueStore, StorageResult};
use crate::utils::clock::Clock;
use crate::utils::constants::ACTION_QUEUE_KEY;

/// Queue of mutations to replay against the backend. Clones share the
/// same storage and the same in-flight flag.
#[derive(Clone)]
pub struct ActionQueue<S, C> {
    store: S,
    clock: C,
    key: &'static str,
    draining: Rc<Cell<bool>>,
}

/// Clears the in-flight flag however the drain future ends.
struct DrainGuard(Rc<Cell<bool>>);

impl Drop for DrainGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<S: KeyValueStore, C: Clock> ActionQueue<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            key: ACTION_QUEUE_KEY,
            draining: Rc::new(Cell::new(false)),
        }
    }

    /// Queued actions in enqueue order. Unreadable or foreign-version blobs
    /// read as an empty queue.
    pub fn pending(&self) -> Vec<QueuedAction> {
        match load_json::<_, ActionQueueRecord>(&self.store, self.key) {
            Ok(Some(record)) if record.is_current() => record.actions,
            Ok(Some(record)) => {
                log::warn!(
                    "⚠️ Action queue version {} != {}, ignored",
                    record.version,
                    QUEUE_VERSION
                );
                Vec::new()
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("⚠️ Failed to load action queue: {}", e);
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending().is_empty()
    }

    pub fn is_draining(&self) -> bool {
        self.draining.get()
    }

    fn write(&self, actions: Vec<QueuedAction>) -> StorageResult<()> {
        let count = actions.len();
        save_json(&self.store, self.key, &ActionQueueRecord::new(actions))?;
        log::info!("💾 Action queue saved: {} pending", count);
        Ok(())
    }

    /// Appends `action`. No deduplication.
    pub fn enqueue(&self, action: QueuedAction) {
        log::info!("📝 Queueing {:?}", action);
        let mut actions = self.pending();
        actions.push(action);
        if let Err(e) = self.write(actions) {
            log::warn!("⚠️ Failed to save action queue: {}", e);
        }
    }

    /// Queue a mark-as-found for `id`, stamped now.
    pub fn enqueue_mark_found(&self, id: i64) {
        self.enqueue(QueuedAction::mark_found(id, self.clock.now()));
    }

    /// Queue a delete for `id`, stamped now.
    pub fn enqueue_delete(&self, id: i64) {
        self.enqueue(QueuedAction::delete(id, self.clock.now()));
    }

    /// Replays every queued action once, in order. Accepted actions are
    /// dropped, failed ones kept in their original order. Returns
    /// immediately if another drain is running.
    pub async fn drain<A: ReportApi + ?Sized>(&self, api: &A) -> DrainReport {
        if self.draining.get() {
            log::info!("⏳ Queue drain already in progress, skipping");
            return DrainReport::skipped();
        }
        self.draining.set(true);
        let _guard = DrainGuard(self.draining.clone());

        let snapshot = self.pending();
        if snapshot.is_empty() {
            log::info!("📭 No queued actions");
            return DrainReport::default();
        }

        log::info!("🔄 Draining {} queued actions", snapshot.len());
        let mut remaining = Vec::new();
        let mut processed = 0;
        for action in &snapshot {
            let result = match action {
                QueuedAction::MarkFound { id, .. } => api.mark_found(*id).await,
                QueuedAction::Delete { id, .. } => api.delete_report(*id).await,
            };
            match result {
                Ok(()) => processed += 1,
                Err(e) => {
                    log::warn!("⚠️ Queued action for report {} failed: {}", action.report_id(), e);
                    remaining.push(action.clone());
                }
            }
        }

        // Actions enqueued while we were awaiting the network sit after the
        // snapshot; keep them behind the survivors.
        let current = self.pending();
        if current.len() > snapshot.len() && current.starts_with(&snapshot) {
            remaining.extend_from_slice(&current[snapshot.len()..]);
        }

        let report = DrainReport {
            processed,
            remaining: remaining.len(),
            skipped: false,
        };
        if let Err(e) = self.write(remaining) {
            log::warn!("⚠️ Failed to save action queue after drain: {}", e);
        }
        log::info!(
            "✅ Queue drained: {} sent, {} still pending",
            report.processed,
            report.remaining
        );
        report
    }
}
