use crate::models::report::Report;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Schema version of the persisted snapshot blob.
pub const CACHE_VERSION: u32 = 2;

/// Last successfully fetched list of the user's reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedSnapshot {
    pub version: u32,
    pub items: Vec<Report>,
    pub saved_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CachedSnapshot {
    pub fn new(items: Vec<Report>, saved_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            version: CACHE_VERSION,
            items,
            saved_at,
            expires_at: saved_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_current(&self) -> bool {
        self.version == CACHE_VERSION
    }
}

/// Summary of the stored snapshot, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub total_reports: usize,
    pub age_hours: i64,
    pub version: u32,
    pub expired: bool,
}
