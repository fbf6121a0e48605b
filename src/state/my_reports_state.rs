// ============================================================================
// MY REPORTS STATE - list, load phase, filter and notices of the view
// ============================================================================

use std::collections::BTreeSet;

use crate::models::report::{apply_status, Report, ReportStatus};
use crate::state::reactivity::ReactiveState;

/// Where the in-memory list came from.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadPhase {
    Loading,
    Loaded,
    LoadedFromCache,
    Failed(String),
}

/// What the view shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded,
    LoadedFromCache,
    Empty,
    Error(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MyReportsSnapshot {
    pub reports: Vec<Report>,
    pub phase: LoadPhase,
    pub filter: ReportStatus,
    /// Non-blocking banner (offline data, change queued for later).
    pub notice: Option<String>,
    /// Reports whose delete request is in flight.
    pub busy_ids: BTreeSet<i64>,
}

impl Default for MyReportsSnapshot {
    fn default() -> Self {
        Self {
            reports: Vec::new(),
            phase: LoadPhase::Loading,
            filter: ReportStatus::Active,
            notice: None,
            busy_ids: BTreeSet::new(),
        }
    }
}

impl MyReportsSnapshot {
    pub fn is_busy(&self, id: i64) -> bool {
        self.busy_ids.contains(&id)
    }

    pub fn visible(&self) -> Vec<&Report> {
        self.reports
            .iter()
            .filter(|r| r.status == self.filter)
            .collect()
    }

    pub fn view_state(&self) -> ViewState {
        match &self.phase {
            LoadPhase::Loading => ViewState::Loading,
            LoadPhase::Failed(message) => ViewState::Error(message.clone()),
            _ if self.visible().is_empty() => ViewState::Empty,
            LoadPhase::Loaded => ViewState::Loaded,
            LoadPhase::LoadedFromCache => ViewState::LoadedFromCache,
        }
    }
}

/// Shared, observable state of the "my reports" view.
#[derive(Clone)]
pub struct MyReportsState {
    inner: ReactiveState<MyReportsSnapshot>,
}

impl MyReportsState {
    pub fn new() -> Self {
        Self {
            inner: ReactiveState::new(MyReportsSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> MyReportsSnapshot {
        self.inner.get()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.inner.with(|s| s.reports.clone())
    }

    pub fn visible_reports(&self) -> Vec<Report> {
        self.inner
            .with(|s| s.visible().into_iter().cloned().collect())
    }

    pub fn view_state(&self) -> ViewState {
        self.inner.with(|s| s.view_state())
    }

    pub fn filter(&self) -> ReportStatus {
        self.inner.with(|s| s.filter)
    }

    pub fn notice(&self) -> Option<String> {
        self.inner.with(|s| s.notice.clone())
    }

    pub fn is_busy(&self, id: i64) -> bool {
        self.inner.with(|s| s.is_busy(id))
    }

    pub fn busy_ids(&self) -> Vec<i64> {
        self.inner.with(|s| s.busy_ids.iter().copied().collect())
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) {
        self.inner.subscribe(callback);
    }

    pub fn set_filter(&self, filter: ReportStatus) {
        self.inner.update(|s| s.filter = filter);
    }

    pub fn begin_loading(&self) {
        self.inner.update(|s| s.phase = LoadPhase::Loading);
    }

    /// Authoritative list from the backend.
    pub fn apply_fetched(&self, reports: Vec<Report>) {
        self.inner.update(|s| {
            s.reports = reports;
            s.phase = LoadPhase::Loaded;
            s.notice = None;
        });
    }

    pub fn apply_cached(&self, reports: Vec<Report>, notice: Option<String>) {
        self.inner.update(|s| {
            s.reports = reports;
            s.phase = LoadPhase::LoadedFromCache;
            s.notice = notice;
        });
    }

    pub fn apply_failure(&self, message: String) {
        self.inner.update(|s| {
            s.reports.clear();
            s.phase = LoadPhase::Failed(message);
            s.notice = None;
        });
    }

    /// Optimistic status change. Returns the full list after the change.
    pub fn apply_status(&self, id: i64, status: ReportStatus) -> Vec<Report> {
        self.inner.update(|s| {
            apply_status(&mut s.reports, id, status);
            s.reports.clone()
        })
    }

    pub fn set_notice(&self, notice: Option<String>) {
        self.inner.update(|s| s.notice = notice);
    }

    pub fn mark_busy(&self, id: i64) {
        self.inner.update(|s| {
            s.busy_ids.insert(id);
        });
    }

    /// Releases `id` only; other in-flight deletes stay busy.
    pub fn clear_busy(&self, id: i64) {
        self.inner.update(|s| {
            s.busy_ids.remove(&id);
        });
    }
}

impl Default for MyReportsState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::sample_report;

    #[test]
    fn starts_loading_with_active_filter() {
        let state = MyReportsState::new();
        assert_eq!(state.view_state(), ViewState::Loading);
        assert_eq!(state.filter(), ReportStatus::Active);
    }

    #[test]
    fn filter_partitions_in_memory_list() {
        let state = MyReportsState::new();
        state.apply_fetched(vec![
            sample_report(1, ReportStatus::Active),
            sample_report(2, ReportStatus::Resolved),
            sample_report(3, ReportStatus::Active),
        ]);
        let ids: Vec<i64> = state.visible_reports().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        state.set_filter(ReportStatus::Deleted);
        assert_eq!(state.view_state(), ViewState::Empty);

        state.set_filter(ReportStatus::Resolved);
        assert_eq!(state.view_state(), ViewState::Loaded);
        assert_eq!(state.reports().len(), 3);
    }

    #[test]
    fn failure_wins_over_filter_and_clears_list() {
        let state = MyReportsState::new();
        state.apply_fetched(vec![sample_report(1, ReportStatus::Active)]);
        state.apply_failure("Network error: down".to_string());
        assert_eq!(
            state.view_state(),
            ViewState::Error("Network error: down".to_string())
        );
        assert!(state.reports().is_empty());
    }

    #[test]
    fn busy_ids_are_tracked_per_report() {
        let state = MyReportsState::new();
        state.mark_busy(1);
        state.mark_busy(2);
        state.clear_busy(1);

        assert!(!state.is_busy(1));
        assert!(state.is_busy(2));
        assert_eq!(state.busy_ids(), vec![2]);
    }
}
