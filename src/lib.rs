// ============================================================================
// TEMU CEPAT - "MY REPORTS" CLIENT (RUST + WASM)
// ============================================================================
// MVVM layering:
// - Views: functions that render DOM (no logic)
// - ViewModels: UI state machine + logic
// - Services: HTTP, storage, offline queue, connectivity
// - State: Rc<RefCell> state with subscribers
// - Models: records shared with the backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
pub use entry::main;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::App;
    use crate::config::CONFIG;

    // Keeps the App (and its network listeners) alive for the page lifetime
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            let level = if CONFIG.is_production() {
                log::Level::Info
            } else {
                log::Level::Debug
            };
            wasm_logger::init(Config::new(level));
        }
        log::info!("🚀 Temu Cepat - my reports ({})", CONFIG.environment);

        let app = App::new()?;
        app.mount()?;

        APP.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });
        Ok(())
    }
}
