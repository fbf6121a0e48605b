// ============================================================================
// MY REPORTS VIEWMODEL - fetch, cache fallback, optimistic mutations
// ============================================================================
// Failures never escape this layer: each one becomes a state transition.
// ============================================================================

use chrono::Duration;
use std::cell::Cell;
use std::rc::Rc;

use crate::models::queue::DrainReport;
use crate::models::report::ReportStatus;
use crate::services::api_client::{ApiError, ReportApi};
use crate::services::cache_service::ReportCache;
use crate::services::offline_service::ActionQueue;
use crate::services::storage::KeyValueStore;
use crate::state::my_reports_state::MyReportsState;
use crate::utils::clock::Clock;
use crate::utils::constants::{
    NOTICE_DELETE_QUEUED, NOTICE_FETCH_FAILED, NOTICE_MARK_FOUND_QUEUED, NOTICE_OFFLINE_DATA,
};

/// How a mutation ended from the user's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Backend accepted it and the list was re-fetched.
    Synced,
    /// Backend unreachable; the action waits in the offline queue.
    Queued,
    /// The view was torn down before the action started.
    Ignored,
}

fn failure_message(error: &ApiError) -> String {
    format!("{} ({})", NOTICE_FETCH_FAILED, error)
}

pub struct MyReportsViewModel<A, S, C> {
    api: Rc<A>,
    cache: ReportCache<S, C>,
    queue: ActionQueue<S, C>,
    state: MyReportsState,
    disposed: Rc<Cell<bool>>,
}

impl<A, S: Clone, C: Clone> Clone for MyReportsViewModel<A, S, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            cache: self.cache.clone(),
            queue: self.queue.clone(),
            state: self.state.clone(),
            disposed: self.disposed.clone(),
        }
    }
}

impl<A, S, C> MyReportsViewModel<A, S, C>
where
    A: ReportApi,
    S: KeyValueStore + Clone,
    C: Clock + Clone,
{
    pub fn new(api: A, store: S, clock: C, cache_ttl: Duration) -> Self {
        Self {
            api: Rc::new(api),
            cache: ReportCache::new(store.clone(), clock.clone(), cache_ttl),
            queue: ActionQueue::new(store, clock),
            state: MyReportsState::new(),
            disposed: Rc::new(Cell::new(false)),
        }
    }

    pub fn state(&self) -> &MyReportsState {
        &self.state
    }

    pub fn queue(&self) -> &ActionQueue<S, C> {
        &self.queue
    }

    pub fn cache(&self) -> &ReportCache<S, C> {
        &self.cache
    }

    /// Ends the view's lifetime. Responses arriving afterwards are dropped.
    pub fn teardown(&self) {
        log::info!("🔌 My reports view torn down");
        self.disposed.set(true);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// First load of the view: fetch, then replay anything queued offline.
    pub async fn mount(&self) {
        self.refresh().await;
        self.drain_queue().await;
    }

    /// Live fetch with cache fallback.
    pub async fn refresh(&self) {
        if self.is_disposed() {
            return;
        }
        self.state.begin_loading();
        let result = self.api.list_my_reports().await;
        if self.is_disposed() {
            log::info!("🔌 Fetch finished after teardown, ignored");
            return;
        }

        match result {
            Ok(reports) => {
                self.cache.save(&reports);
                self.state.apply_fetched(reports);
            }
            Err(ApiError::Unauthorized) => {
                // No reporter cookie: shown like an account without reports.
                log::warn!("🔒 Reports fetch unauthorized, showing empty list");
                self.state.apply_fetched(Vec::new());
            }
            Err(e) => {
                log::error!("❌ Reports fetch failed: {}", e);
                match self.cache.load() {
                    Some(cached) => {
                        let notice = if cached.is_empty() {
                            None
                        } else {
                            Some(NOTICE_OFFLINE_DATA.to_string())
                        };
                        self.state.apply_cached(cached, notice);
                    }
                    None => self.state.apply_failure(failure_message(&e)),
                }
            }
        }
    }

    /// Client-side only; performs no I/O.
    pub fn set_filter(&self, filter: ReportStatus) {
        self.state.set_filter(filter);
    }

    pub async fn mark_found(&self, id: i64) -> ActionOutcome {
        if self.is_disposed() {
            return ActionOutcome::Ignored;
        }
        let reports = self.state.apply_status(id, ReportStatus::Resolved);
        self.cache.save(&reports);

        match self.api.mark_found(id).await {
            Ok(()) => {
                self.refresh().await;
                ActionOutcome::Synced
            }
            Err(e) => {
                log::warn!("⚠️ Mark found for {} failed, queued: {}", id, e);
                self.queue.enqueue_mark_found(id);
                if !self.is_disposed() {
                    self.state
                        .set_notice(Some(NOTICE_MARK_FOUND_QUEUED.to_string()));
                }
                ActionOutcome::Queued
            }
        }
    }

    pub async fn delete(&self, id: i64) -> ActionOutcome {
        if self.is_disposed() {
            return ActionOutcome::Ignored;
        }
        self.state.mark_busy(id);
        let reports = self.state.apply_status(id, ReportStatus::Deleted);
        self.cache.save(&reports);

        let result = self.api.delete_report(id).await;
        if !self.is_disposed() {
            self.state.clear_busy(id);
        }
        match result {
            Ok(()) => {
                self.refresh().await;
                ActionOutcome::Synced
            }
            Err(e) => {
                log::warn!("⚠️ Delete of {} failed, queued: {}", id, e);
                self.queue.enqueue_delete(id);
                if !self.is_disposed() {
                    self.state.set_notice(Some(NOTICE_DELETE_QUEUED.to_string()));
                }
                ActionOutcome::Queued
            }
        }
    }

    /// Replays the offline queue; re-fetches if anything went through.
    pub async fn drain_queue(&self) -> DrainReport {
        if self.is_disposed() {
            return DrainReport::skipped();
        }
        let report = self.queue.drain(self.api.as_ref()).await;
        if report.needs_refresh() {
            self.refresh().await;
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::sample_report;
    use crate::models::{QueuedAction, Report};
    use crate::services::fake_api::{Call, FakeReportApi};
    use crate::services::storage::MemoryStorage;
    use crate::state::my_reports_state::ViewState;
    use crate::utils::clock::ManualClock;

    type TestViewModel = MyReportsViewModel<FakeReportApi, MemoryStorage, ManualClock>;

    struct Harness {
        vm: TestViewModel,
        api: FakeReportApi,
        store: MemoryStorage,
        clock: ManualClock,
    }

    fn harness(reports: Vec<Report>) -> Harness {
        let api = FakeReportApi::with_reports(reports);
        let store = MemoryStorage::new();
        let clock = ManualClock::new();
        let vm = MyReportsViewModel::new(api.clone(), store.clone(), clock.clone(), Duration::days(30));
        Harness {
            vm,
            api,
            store,
            clock,
        }
    }

    fn status_of(vm: &TestViewModel, id: i64) -> Option<ReportStatus> {
        vm.state()
            .reports()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.status)
    }

    #[tokio::test]
    async fn successful_fetch_loads_and_writes_cache() {
        let h = harness(vec![
            sample_report(1, ReportStatus::Active),
            sample_report(2, ReportStatus::Resolved),
        ]);
        h.vm.mount().await;

        assert_eq!(h.vm.state().view_state(), ViewState::Loaded);
        assert_eq!(h.vm.state().visible_reports().len(), 1);
        assert_eq!(h.vm.cache().load().map(|r| r.len()), Some(2));
        assert_eq!(h.vm.state().notice(), None);
    }

    #[tokio::test]
    async fn no_reports_with_active_filter_is_empty() {
        let h = harness(vec![sample_report(1, ReportStatus::Resolved)]);
        h.vm.refresh().await;
        assert_eq!(h.vm.state().view_state(), ViewState::Empty);
    }

    #[tokio::test]
    async fn network_error_without_cache_shows_error() {
        let h = harness(Vec::new());
        h.api.fail_list(ApiError::Network("Failed to fetch".to_string()));
        h.vm.refresh().await;

        match h.vm.state().view_state() {
            ViewState::Error(message) => {
                assert!(message.starts_with(NOTICE_FETCH_FAILED));
                assert!(message.contains("Failed to fetch"));
            }
            other => panic!("expected error state, got {:?}", other),
        }
        assert!(h.vm.state().reports().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_shows_empty_without_error() {
        let h = harness(Vec::new());
        h.api.fail_list(ApiError::Unauthorized);
        h.vm.refresh().await;

        assert_eq!(h.vm.state().view_state(), ViewState::Empty);
        assert_eq!(h.vm.state().notice(), None);
        assert!(h.vm.state().reports().is_empty());
    }

    #[tokio::test]
    async fn network_error_falls_back_to_cache_with_notice() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        h.vm.refresh().await;

        h.api.fail_list(ApiError::Http {
            status: 502,
            message: "Bad Gateway".to_string(),
        });
        h.clock.advance(Duration::days(2));
        h.vm.refresh().await;

        assert_eq!(h.vm.state().view_state(), ViewState::LoadedFromCache);
        assert_eq!(h.vm.state().notice().as_deref(), Some(NOTICE_OFFLINE_DATA));
        assert_eq!(h.vm.state().reports().len(), 1);
    }

    #[tokio::test]
    async fn empty_cache_fallback_has_no_notice() {
        let h = harness(Vec::new());
        h.vm.refresh().await;
        h.api.fail_list(ApiError::Network("offline".to_string()));
        h.vm.refresh().await;

        assert_eq!(h.vm.state().notice(), None);
        assert_eq!(h.vm.state().view_state(), ViewState::Empty);
    }

    #[tokio::test]
    async fn expired_cache_is_not_used() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        h.vm.refresh().await;
        h.api.fail_list(ApiError::Network("offline".to_string()));
        h.clock.advance(Duration::days(31));
        h.vm.refresh().await;

        assert!(matches!(h.vm.state().view_state(), ViewState::Error(_)));
    }

    #[tokio::test]
    async fn mark_found_is_visible_before_response() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        h.vm.refresh().await;
        h.api.gate.close();

        let (outcome, seen) = tokio::join!(h.vm.mark_found(1), async {
            tokio::task::yield_now().await;
            let seen = status_of(&h.vm, 1);
            h.api.gate.open();
            seen
        });

        assert_eq!(seen, Some(ReportStatus::Resolved));
        assert_eq!(outcome, ActionOutcome::Synced);
        // Reconciled from the server, which now agrees.
        assert_eq!(status_of(&h.vm, 1), Some(ReportStatus::Resolved));
        assert_eq!(h.api.list_calls(), 2);
    }

    #[tokio::test]
    async fn failed_mark_found_is_queued_and_cached() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        h.vm.refresh().await;
        h.api.set_offline(true);

        assert_eq!(h.vm.mark_found(1).await, ActionOutcome::Queued);
        assert_eq!(status_of(&h.vm, 1), Some(ReportStatus::Resolved));
        assert_eq!(
            h.vm.state().notice().as_deref(),
            Some(NOTICE_MARK_FOUND_QUEUED)
        );
        let cached = h.vm.cache().load().unwrap();
        assert_eq!(cached[0].status, ReportStatus::Resolved);
        assert!(matches!(
            h.vm.queue().pending().as_slice(),
            [QueuedAction::MarkFound { id: 1, .. }]
        ));
    }

    #[tokio::test]
    async fn failed_delete_then_drain_reconciles() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        h.vm.refresh().await;
        h.api.set_offline(true);

        assert_eq!(h.vm.delete(1).await, ActionOutcome::Queued);
        assert_eq!(status_of(&h.vm, 1), Some(ReportStatus::Deleted));
        assert!(h.vm.state().busy_ids().is_empty());
        assert!(matches!(
            h.vm.queue().pending().as_slice(),
            [QueuedAction::Delete { id: 1, .. }]
        ));

        h.api.set_offline(false);
        let lists_before = h.api.list_calls();
        let report = h.vm.drain_queue().await;

        assert_eq!(report.processed, 1);
        assert!(h.vm.queue().is_empty());
        assert_eq!(h.api.list_calls(), lists_before + 1);
        assert_eq!(h.api.server_reports()[0].status, ReportStatus::Deleted);
        assert_eq!(status_of(&h.vm, 1), Some(ReportStatus::Deleted));
    }

    #[tokio::test]
    async fn delete_marks_report_busy_while_in_flight() {
        let h = harness(vec![sample_report(4, ReportStatus::Active)]);
        h.vm.refresh().await;
        h.api.gate.close();

        let (_, busy) = tokio::join!(h.vm.delete(4), async {
            tokio::task::yield_now().await;
            let busy = h.vm.state().is_busy(4);
            h.api.gate.open();
            busy
        });

        assert!(busy);
        assert!(!h.vm.state().is_busy(4));
    }

    #[tokio::test]
    async fn finished_delete_leaves_other_delete_busy() {
        let h = harness(vec![
            sample_report(1, ReportStatus::Active),
            sample_report(2, ReportStatus::Active),
        ]);
        h.vm.refresh().await;
        let hold_two = h.api.hold(2);

        let (first, second, busy) = tokio::join!(h.vm.delete(1), h.vm.delete(2), async {
            // Let delete(1) run to completion while delete(2) waits.
            for _ in 0..8 {
                tokio::task::yield_now().await;
            }
            let busy = (h.vm.state().is_busy(1), h.vm.state().is_busy(2));
            hold_two.open();
            busy
        });

        assert_eq!(first, ActionOutcome::Synced);
        assert_eq!(second, ActionOutcome::Synced);
        assert_eq!(busy, (false, true));
        assert!(h.vm.state().busy_ids().is_empty());
    }

    #[tokio::test]
    async fn mount_replays_queue_from_previous_session() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        {
            let previous = ActionQueue::new(h.store.clone(), h.clock.clone());
            previous.enqueue_mark_found(1);
        }

        h.vm.mount().await;

        assert!(h.vm.queue().is_empty());
        assert_eq!(
            h.api.calls(),
            vec![Call::List, Call::MarkFound(1), Call::List]
        );
        assert_eq!(status_of(&h.vm, 1), Some(ReportStatus::Resolved));
    }

    #[tokio::test]
    async fn drain_without_progress_does_not_refetch() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        h.vm.refresh().await;
        h.api.set_offline(true);
        h.vm.mark_found(1).await;

        let report = h.vm.drain_queue().await;
        assert_eq!(report.remaining, 1);
        assert_eq!(h.api.list_calls(), 1);
    }

    #[tokio::test]
    async fn switching_filters_makes_no_calls() {
        let h = harness(vec![
            sample_report(1, ReportStatus::Active),
            sample_report(2, ReportStatus::Deleted),
        ]);
        h.vm.refresh().await;
        let calls = h.api.calls().len();

        for filter in ReportStatus::FILTERS {
            h.vm.set_filter(filter);
        }
        h.vm.set_filter(ReportStatus::Deleted);

        assert_eq!(h.api.calls().len(), calls);
        assert_eq!(h.vm.state().visible_reports()[0].id, 2);
    }

    #[tokio::test]
    async fn results_after_teardown_are_ignored() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        h.api.gate.close();

        tokio::join!(h.vm.refresh(), async {
            tokio::task::yield_now().await;
            h.vm.teardown();
            h.api.gate.open();
        });

        assert_eq!(h.vm.state().view_state(), ViewState::Loading);
        assert_eq!(h.vm.cache().load(), None);
        assert_eq!(h.vm.mark_found(1).await, ActionOutcome::Ignored);
        assert_eq!(h.api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn state_changes_notify_subscribers() {
        let h = harness(vec![sample_report(1, ReportStatus::Active)]);
        let renders = Rc::new(Cell::new(0));
        {
            let renders = renders.clone();
            h.vm.state().subscribe(move || renders.set(renders.get() + 1));
        }
        h.vm.refresh().await;
        // begin_loading + apply_fetched
        assert_eq!(renders.get(), 2);
    }
}
