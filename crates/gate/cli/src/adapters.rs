//! Terminal stand-ins for the browser's analytics client and router.

use legend_gate::{IdentificationSink, Navigator};
use legend_gate_types::{Identity, Route};
use tracing::info;

/// Logs identification calls instead of sending them anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl IdentificationSink for TracingSink {
    fn identify(&self, identity: &Identity) {
        let properties = serde_json::Value::Object(identity.analytics_properties());
        info!(id = %identity.email(), %properties, "identify");
    }
}

/// Prints where the browser would have gone.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn push(&self, route: &Route) {
        println!("→ {route}");
    }

    fn replace(&self, route: &Route) {
        println!("→ {route} (replacing history)");
    }
}
