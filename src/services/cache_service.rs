use chrono::Duration;

use crate::models::cache::{CacheStats, CachedSnapshot, CACHE_VERSION};
use crate::models::report::Report;
use crate::services::storage::{load_json, save_json, KeyValueStore, StorageError};
use crate::utils::clock::Clock;
use crate::utils::constants::REPORT_CACHE_KEY;

/// Browser-local snapshot of the user's reports, read only when the live
/// fetch fails. Storage failures are logged and swallowed.
#[derive(Clone)]
pub struct ReportCache<S, C> {
    store: S,
    clock: C,
    ttl: Duration,
    key: &'static str,
}

impl<S: KeyValueStore, C: Clock> ReportCache<S, C> {
    pub fn new(store: S, clock: C, ttl: Duration) -> Self {
        Self {
            store,
            clock,
            ttl,
            key: REPORT_CACHE_KEY,
        }
    }

    /// Overwrites the snapshot with `reports`, stamped now + TTL.
    pub fn save(&self, reports: &[Report]) {
        let snapshot = CachedSnapshot::new(reports.to_vec(), self.clock.now(), self.ttl);
        match save_json(&self.store, self.key, &snapshot) {
            Ok(()) => log::info!("💾 Report cache saved: {} reports", reports.len()),
            Err(e) => log::warn!("⚠️ Failed to save report cache: {}", e),
        }
    }

    /// Cached reports, or `None` when missing, unreadable, of another
    /// version, or expired. Anything but "missing" is purged.
    pub fn load(&self) -> Option<Vec<Report>> {
        let snapshot = match load_json::<_, CachedSnapshot>(&self.store, self.key) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                log::info!("ℹ️ No report cache stored");
                return None;
            }
            Err(StorageError::Serialization(e)) => {
                log::warn!("⚠️ Unreadable report cache discarded: {}", e);
                self.clear();
                return None;
            }
            Err(e) => {
                log::warn!("⚠️ Failed to load report cache: {}", e);
                return None;
            }
        };

        if !snapshot.is_current() {
            log::info!(
                "❌ Report cache version {} != {}, discarded",
                snapshot.version,
                CACHE_VERSION
            );
            self.clear();
            return None;
        }

        if snapshot.is_expired(self.clock.now()) {
            log::info!("❌ Report cache expired at {}", snapshot.expires_at);
            self.clear();
            return None;
        }

        log::info!("✅ Report cache loaded: {} reports", snapshot.items.len());
        Some(snapshot.items)
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(self.key) {
            log::warn!("⚠️ Failed to clear report cache: {}", e);
        }
    }

    /// Describes the stored snapshot without purging it.
    pub fn stats(&self) -> CacheStats {
        match load_json::<_, CachedSnapshot>(&self.store, self.key) {
            Ok(Some(snapshot)) => {
                let now = self.clock.now();
                CacheStats {
                    total_reports: snapshot.items.len(),
                    age_hours: now.signed_duration_since(snapshot.saved_at).num_hours(),
                    version: snapshot.version,
                    expired: snapshot.is_expired(now),
                }
            }
            _ => CacheStats::default(),
        }
    }
}
