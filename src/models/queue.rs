// ============================================================================
// OFFLINE ACTION QUEUE - persisted mutations waiting for the backend
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version of the persisted queue blob.
pub const QUEUE_VERSION: u32 = 2;

/// A mutation whose remote call failed and must be retried.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QueuedAction {
    #[serde(rename = "markFound")]
    MarkFound { id: i64, ts: DateTime<Utc> },
    #[serde(rename = "delete")]
    Delete { id: i64, ts: DateTime<Utc> },
}

impl QueuedAction {
    pub fn mark_found(id: i64, ts: DateTime<Utc>) -> Self {
        QueuedAction::MarkFound { id, ts }
    }

    pub fn delete(id: i64, ts: DateTime<Utc>) -> Self {
        QueuedAction::Delete { id, ts }
    }

    pub fn report_id(&self) -> i64 {
        match self {
            QueuedAction::MarkFound { id, .. } | QueuedAction::Delete { id, .. } => *id,
        }
    }

    pub fn enqueued_at(&self) -> DateTime<Utc> {
        match self {
            QueuedAction::MarkFound { ts, .. } | QueuedAction::Delete { ts, .. } => *ts,
        }
    }
}

/// What is stored under the queue key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionQueueRecord {
    pub version: u32,
    pub actions: Vec<QueuedAction>,
}

impl ActionQueueRecord {
    pub fn new(actions: Vec<QueuedAction>) -> Self {
        Self {
            version: QUEUE_VERSION,
            actions,
        }
    }

    pub fn is_current(&self) -> bool {
        self.version == QUEUE_VERSION
    }
}

/// Result of one drain pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Actions the backend accepted and that were dropped from the queue.
    pub processed: usize,
    /// Actions left in the queue after the pass.
    pub remaining: usize,
    /// True when another drain was already running and this one did nothing.
    pub skipped: bool,
}

impl DrainReport {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    /// Whether server state changed and the list must be re-fetched.
    pub fn needs_refresh(&self) -> bool {
        self.processed > 0
    }
}
