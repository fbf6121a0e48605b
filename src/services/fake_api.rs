//! Scriptable in-memory `ReportApi` for tests.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::future::poll_fn;
use std::rc::Rc;
use std::task::{Poll, Waker};

use crate::models::{Report, ReportStatus};
use crate::services::api_client::{ApiError, ApiResult, ReportApi};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    List,
    MarkFound(i64),
    Delete(i64),
}

#[derive(Default)]
struct GateState {
    closed: bool,
    wakers: Vec<Waker>,
}

/// Holds every remote call until opened, to observe state mid-request.
#[derive(Clone, Default)]
pub struct Gate {
    state: Rc<RefCell<GateState>>,
}

impl Gate {
    pub fn close(&self) {
        self.state.borrow_mut().closed = true;
    }

    pub fn open(&self) {
        let wakers = {
            let mut state = self.state.borrow_mut();
            state.closed = false;
            std::mem::take(&mut state.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }

    async fn pass(&self) {
        poll_fn(|cx| {
            let mut state = self.state.borrow_mut();
            if state.closed {
                state.wakers.push(cx.waker().clone());
                Poll::Pending
            } else {
                Poll::Ready(())
            }
        })
        .await
    }
}

/// Clones share state, so a test can keep a handle while the view model
/// owns another.
#[derive(Clone, Default)]
pub struct FakeReportApi {
    reports: Rc<RefCell<Vec<Report>>>,
    list_error: Rc<RefCell<Option<ApiError>>>,
    offline: Rc<Cell<bool>>,
    failing_ids: Rc<RefCell<HashSet<i64>>>,
    calls: Rc<RefCell<Vec<Call>>>,
    held: Rc<RefCell<HashMap<i64, Gate>>>,
    pub gate: Gate,
}

impl FakeReportApi {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        let api = Self::default();
        api.set_reports(reports);
        api
    }

    pub fn set_reports(&self, reports: Vec<Report>) {
        *self.reports.borrow_mut() = reports;
    }

    pub fn server_reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    pub fn fail_list(&self, error: ApiError) {
        *self.list_error.borrow_mut() = Some(error);
    }

    /// Every mutation fails with a network error while offline.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn fail_id(&self, id: i64) {
        self.failing_ids.borrow_mut().insert(id);
    }

    /// Closed gate for mutations of `id` only; other calls pass.
    pub fn hold(&self, id: i64) -> Gate {
        let gate = Gate::default();
        gate.close();
        self.held.borrow_mut().insert(id, gate.clone());
        gate
    }

    async fn pass_held(&self, id: i64) {
        let gate = self.held.borrow().get(&id).cloned();
        if let Some(gate) = gate {
            gate.pass().await;
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn list_calls(&self) -> usize {
        self.count(&Call::List)
    }

    fn mutation(&self, id: i64, status: ReportStatus) -> ApiResult<()> {
        if self.offline.get() || self.failing_ids.borrow().contains(&id) {
            return Err(ApiError::Network("Failed to fetch".to_string()));
        }
        for report in self.reports.borrow_mut().iter_mut().filter(|r| r.id == id) {
            report.status = status;
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl ReportApi for FakeReportApi {
    async fn list_my_reports(&self) -> ApiResult<Vec<Report>> {
        self.calls.borrow_mut().push(Call::List);
        self.gate.pass().await;
        if let Some(error) = self.list_error.borrow().clone() {
            return Err(error);
        }
        Ok(self.reports.borrow().clone())
    }

    async fn mark_found(&self, id: i64) -> ApiResult<()> {
        self.calls.borrow_mut().push(Call::MarkFound(id));
        self.gate.pass().await;
        self.pass_held(id).await;
        self.mutation(id, ReportStatus::Resolved)
    }

    async fn delete_report(&self, id: i64) -> ApiResult<()> {
        self.calls.borrow_mut().push(Call::Delete(id));
        self.gate.pass().await;
        self.pass_held(id).await;
        self.mutation(id, ReportStatus::Deleted)
    }
}
