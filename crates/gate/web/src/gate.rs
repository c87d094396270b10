//! The `LegendGate` class exported to JavaScript.

use legend_gate::{SessionGate, Submission};
use legend_gate_types::Route;
use wasm_bindgen::prelude::*;

use crate::config::GateOptions;
use crate::navigator::HistoryNavigator;
use crate::sink::PosthogSink;
use crate::storage::LocalStorageBackend;

type BrowserGate = SessionGate<Option<LocalStorageBackend>, PosthogSink, HistoryNavigator>;

/// Session gate bound to `localStorage`, PostHog and the History API.
///
/// A host component creates one per page load, calls `mount()` once, and
/// renders its children when `isAuthenticated` is true or the form otherwise.
#[wasm_bindgen(js_name = LegendGate)]
#[derive(Debug)]
pub struct WasmLegendGate {
    inner: BrowserGate,
}

#[wasm_bindgen(js_class = LegendGate)]
impl WasmLegendGate {
    /// Create an unmounted gate.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Self {
        let config = GateOptions::from_js(&options).into_config();
        Self {
            inner: SessionGate::new(
                config,
                LocalStorageBackend::from_window(),
                PosthogSink::default(),
                HistoryNavigator,
            ),
        }
    }

    /// Evaluate storage once. Returns whether the visitor is signed in.
    pub fn mount(&mut self) -> bool {
        self.inner.mount().is_authenticated()
    }

    /// Update the email field. Ignored unless the form is showing.
    #[wasm_bindgen(js_name = setEmail)]
    pub fn set_email(&mut self, value: String) {
        if let Some(form) = self.inner.form_mut() {
            form.set_email(value);
        }
    }

    /// Update the name field. Ignored unless the form is showing.
    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&mut self, value: String) {
        if let Some(form) = self.inner.form_mut() {
            form.set_name(value);
        }
    }

    /// Submit the form. Returns whether the visitor is now signed in;
    /// invalid input simply returns `false`.
    ///
    /// # Errors
    ///
    /// Throws if the form is not showing (not mounted, or already signed in).
    pub fn submit(&mut self) -> Result<bool, JsError> {
        let submission = self
            .inner
            .submit()
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(matches!(submission, Submission::Accepted(_)))
    }

    /// Forget the visitor and show the form again.
    ///
    /// # Errors
    ///
    /// Throws if storage could not be cleared.
    #[wasm_bindgen(js_name = signOut)]
    pub fn sign_out(&mut self) -> Result<(), JsError> {
        self.inner
            .sign_out()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Navigate to the sign-in screen (default `/signin`), keeping history.
    #[wasm_bindgen(js_name = beginSignIn)]
    pub fn begin_sign_in(&self, route: Option<String>) {
        let route = route.map(Route::new).unwrap_or_else(Route::sign_in);
        self.inner.begin_sign_in(&route);
    }

    /// `"unknown"`, `"unauthenticated"` or `"authenticated"`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().label().to_string()
    }

    #[wasm_bindgen(getter, js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    /// Whether the form asks for a name as well as an email.
    #[wasm_bindgen(getter, js_name = requiresName)]
    pub fn requires_name(&self) -> bool {
        self.inner.config().capture.requires_name()
    }

    /// Email of the signed-in visitor.
    #[wasm_bindgen(getter)]
    pub fn email(&self) -> Option<String> {
        self.inner
            .identity()
            .map(|identity| identity.email().to_string())
    }

    /// Name of the signed-in visitor, if one was given.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> Option<String> {
        self.inner
            .identity()
            .and_then(|identity| identity.name())
            .map(ToString::to_string)
    }
}
