//! History API navigation.

use legend_gate::{NavigationMode, Navigator};
use legend_gate_types::Route;
use tracing::{debug, warn};
use wasm_bindgen::JsValue;

/// Moves the page with `history.pushState` / `history.replaceState`.
///
/// A `popstate` event is dispatched afterwards so client-side routers pick
/// up the new location without a page load.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryNavigator;

impl HistoryNavigator {
    fn go(&self, route: &Route, mode: NavigationMode) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let history = match window.history() {
            Ok(history) => history,
            Err(e) => {
                warn!(error = ?e, "history API unavailable");
                return;
            }
        };

        let url = Some(route.as_str());
        let result = match mode {
            NavigationMode::Push => history.push_state_with_url(&JsValue::NULL, "", url),
            NavigationMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", url),
        };
        if let Err(e) = result {
            warn!(route = %route, error = ?e, "navigation failed");
            return;
        }

        match web_sys::PopStateEvent::new("popstate") {
            Ok(event) => {
                if let Err(e) = window.dispatch_event(&event) {
                    warn!(error = ?e, "popstate dispatch failed");
                }
            }
            Err(e) => warn!(error = ?e, "could not create popstate event"),
        }

        debug!(route = %route, ?mode, "navigated");
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: &Route) {
        self.go(route, NavigationMode::Push);
    }

    fn replace(&self, route: &Route) {
        self.go(route, NavigationMode::Replace);
    }
}
