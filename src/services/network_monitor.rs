// ============================================================================
// NETWORK MONITOR
// ============================================================================
// Watches window "online"/"offline" events. Only a transition back to online
// fires the callback; it is what triggers the offline queue replay.
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkStatus {
    Online,
    Offline,
    Unknown,
}

impl NetworkStatus {
    pub fn from_on_line(on_line: Option<bool>) -> Self {
        match on_line {
            Some(true) => NetworkStatus::Online,
            Some(false) => NetworkStatus::Offline,
            None => NetworkStatus::Unknown,
        }
    }

    /// Whether moving from `self` to `next` means connectivity came back.
    pub fn regained(self, next: NetworkStatus) -> bool {
        next == NetworkStatus::Online && self != NetworkStatus::Online
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::NetworkMonitor;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::NetworkStatus;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{window, Event, Window};

    /// Listeners live as long as the monitor; dropping it unregisters them.
    pub struct NetworkMonitor {
        status: Rc<Cell<NetworkStatus>>,
        window: Option<Window>,
        online: Option<Closure<dyn FnMut(Event)>>,
        offline: Option<Closure<dyn FnMut(Event)>>,
    }

    fn navigator_on_line(window: &Window) -> Option<bool> {
        let navigator = js_sys::Reflect::get(window, &JsValue::from_str("navigator")).ok()?;
        js_sys::Reflect::get(&navigator, &JsValue::from_str("onLine"))
            .ok()
            .and_then(|v| v.as_bool())
    }

    impl NetworkMonitor {
        /// Starts listening. `on_regained` runs on every offline to online transition.
        pub fn start<F>(on_regained: F) -> Result<Self, JsValue>
        where
            F: Fn() + 'static,
        {
            let window = window().ok_or_else(|| JsValue::from_str("No window"))?;
            let status = Rc::new(Cell::new(NetworkStatus::from_on_line(navigator_on_line(
                &window,
            ))));

            let online = Closure::wrap(Box::new({
                let status = status.clone();
                move |_event: Event| {
                    let previous = status.replace(NetworkStatus::Online);
                    if previous.regained(NetworkStatus::Online) {
                        log::info!("🌐 Network: ONLINE");
                        on_regained();
                    }
                }
            }) as Box<dyn FnMut(Event)>);

            let offline = Closure::wrap(Box::new({
                let status = status.clone();
                move |_event: Event| {
                    log::warn!("📴 Network: OFFLINE");
                    status.set(NetworkStatus::Offline);
                }
            }) as Box<dyn FnMut(Event)>);

            window.add_event_listener_with_callback("online", online.as_ref().unchecked_ref())?;
            window.add_event_listener_with_callback("offline", offline.as_ref().unchecked_ref())?;
            log::info!("✅ NetworkMonitor: listeners registered ({:?})", status.get());

            Ok(Self {
                status,
                window: Some(window),
                online: Some(online),
                offline: Some(offline),
            })
        }

        pub fn is_online(&self) -> bool {
            self.status.get() == NetworkStatus::Online
        }
    }

    impl Drop for NetworkMonitor {
        fn drop(&mut self) {
            if let Some(window) = self.window.take() {
                if let Some(online) = self.online.take() {
                    let _ = window
                        .remove_event_listener_with_callback("online", online.as_ref().unchecked_ref());
                }
                if let Some(offline) = self.offline.take() {
                    let _ = window.remove_event_listener_with_callback(
                        "offline",
                        offline.as_ref().unchecked_ref(),
                    );
                }
            }
            log::info!("🔌 Network monitor dropped");
        }
    }
}
