//! PostHog identification.

use legend_gate::IdentificationSink;
use legend_gate_types::Identity;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};

/// Name of the global the PostHog snippet installs.
pub const DEFAULT_GLOBAL: &str = "posthog";

/// Calls `window.posthog.identify(email, { email, name })`.
///
/// The analytics snippet loads independently of the gate and may be blocked
/// outright; every missing piece along the way is a silent no-op.
#[derive(Debug, Clone)]
pub struct PosthogSink {
    global: String,
}

impl PosthogSink {
    pub fn new(global: impl Into<String>) -> Self {
        Self {
            global: global.into(),
        }
    }

    fn client(&self) -> Option<JsValue> {
        let window = web_sys::window()?;
        let client = js_sys::Reflect::get(&window, &JsValue::from_str(&self.global)).ok()?;
        if client.is_undefined() || client.is_null() {
            return None;
        }
        Some(client)
    }
}

impl Default for PosthogSink {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBAL)
    }
}

impl IdentificationSink for PosthogSink {
    fn identify(&self, identity: &Identity) {
        let Some(client) = self.client() else {
            debug!(global = %self.global, "analytics client not loaded; skipping identify");
            return;
        };

        let identify = match js_sys::Reflect::get(&client, &JsValue::from_str("identify"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        {
            Some(f) => f,
            None => {
                warn!(global = %self.global, "analytics client has no identify function");
                return;
            }
        };

        let props = js_sys::Object::new();
        for (key, value) in identity.analytics_properties() {
            if let Some(value) = value.as_str() {
                if let Err(e) =
                    js_sys::Reflect::set(&props, &JsValue::from_str(&key), &JsValue::from_str(value))
                {
                    debug!(property = %key, error = ?e, "could not set identify property");
                }
            }
        }

        match identify.call2(&client, &JsValue::from_str(identity.email().as_str()), &props) {
            Ok(_) => debug!(email = %identity.email(), "identify sent"),
            Err(e) => warn!(error = ?e, "analytics identify threw"),
        }
    }
}
