//! Options object accepted by the `LegendGate` constructor.

use legend_gate_types::{CaptureMode, GateConfig, Route, StorageKeys};
use wasm_bindgen::JsValue;

/// Plain-data view of the JS options:
///
/// ```js
/// new LegendGate({ requireName: true, nextRoute: "/map" })
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateOptions {
    pub require_name: Option<bool>,
    pub next_route: Option<String>,
    pub email_key: Option<String>,
    pub name_key: Option<String>,
}

impl GateOptions {
    /// Read options from a JS object. `undefined`, `null` and non-objects
    /// yield the defaults; fields of the wrong type are ignored.
    pub fn from_js(options: &JsValue) -> Self {
        if !options.is_object() {
            return Self::default();
        }

        let field = |name: &str| js_sys::Reflect::get(options, &JsValue::from_str(name)).ok();

        Self {
            require_name: field("requireName").and_then(|v| v.as_bool()),
            next_route: field("nextRoute").and_then(|v| v.as_string()),
            email_key: field("emailKey").and_then(|v| v.as_string()),
            name_key: field("nameKey").and_then(|v| v.as_string()),
        }
    }

    pub fn into_config(self) -> GateConfig {
        let defaults = StorageKeys::default();
        let capture = if self.require_name.unwrap_or(false) {
            CaptureMode::NameAndEmail
        } else {
            CaptureMode::EmailOnly
        };

        GateConfig {
            capture,
            next_route: self
                .next_route
                .filter(|route| !route.trim().is_empty())
                .map(Route::new),
            storage_keys: StorageKeys {
                email: self.email_key.unwrap_or(defaults.email),
                name: self.name_key.unwrap_or(defaults.name),
            },
        }
    }
}
