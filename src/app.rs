// ============================================================================
// APP - wires browser services into the my-reports viewmodel
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::get_element_by_id;
use crate::services::{ApiClient, BrowserStorage, NetworkMonitor};
use crate::utils::clock::SystemClock;
use crate::viewmodels::MyReportsViewModel;
use crate::views::render_my_reports;

pub type BrowserViewModel = MyReportsViewModel<ApiClient, BrowserStorage, SystemClock>;

pub struct App {
    vm: BrowserViewModel,
    root: Element,
    monitor: NetworkMonitor,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let vm = MyReportsViewModel::new(
            ApiClient::with_base_url(CONFIG.backend_url()),
            BrowserStorage,
            SystemClock,
            CONFIG.cache_ttl(),
        );

        {
            let root = root.clone();
            let view_vm = vm.clone();
            vm.state().subscribe(move || {
                if let Err(e) = render_my_reports(&root, &view_vm) {
                    log::error!("❌ Render failed: {:?}", e);
                }
            });
        }

        let monitor = {
            let vm = vm.clone();
            NetworkMonitor::start(move || {
                let vm = vm.clone();
                spawn_local(async move {
                    log::info!("🌐 Connection restored, replaying queued actions");
                    vm.drain_queue().await;
                });
            })?
        };

        Ok(Self {
            vm,
            root,
            monitor,
        })
    }

    /// First render, then fetch and replay the queue in the background.
    pub fn mount(&self) -> Result<(), JsValue> {
        render_my_reports(&self.root, &self.vm)?;
        if !self.monitor.is_online() {
            log::warn!("📴 Starting offline, the report cache is the fallback");
        }
        let vm = self.vm.clone();
        spawn_local(async move {
            vm.mount().await;
        });
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.vm.teardown();
    }
}
