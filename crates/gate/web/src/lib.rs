//! # Wasm bindings for the Legend access gate.
//!
//! Wires the [`SessionGate`](legend_gate::SessionGate) to the browser:
//! - [`LocalStorageBackend`] persists the identity in `window.localStorage`
//! - [`PosthogSink`] forwards it to `window.posthog.identify`, if loaded
//! - [`HistoryNavigator`] moves the client router via the History API
//!
//! JavaScript hosts drive everything through [`WasmLegendGate`]
//! (exported as `LegendGate`).

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod gate;
pub mod navigator;
pub mod sink;
pub mod storage;

pub use config::GateOptions;
pub use gate::WasmLegendGate;
pub use navigator::HistoryNavigator;
pub use sink::PosthogSink;
pub use storage::LocalStorageBackend;

use wasm_bindgen::prelude::*;

/// Set a panic hook to get better error messages if the code panics, and
/// route `tracing` output to the browser console.
///
/// Runs on module start. Calling it again from JavaScript is harmless: the
/// panic hook is installed once and an existing subscriber is kept.
#[wasm_bindgen(js_name = setPanicHook)]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "wasm-tracing")]
    {
        let mut config =
            wasm_tracing::WasmLayerConfig::new().with_max_level(tracing::Level::DEBUG);
        config.use_console_methods = true;

        if let Err(e) = wasm_tracing::set_as_global_default_with_config(config) {
            tracing::warn!(error = ?e, "tracing subscriber already installed");
        }
    }
}

/// Entry point called when the wasm module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    tracing::info!("legend-gate-web v{}", env!("CARGO_PKG_VERSION"));
}
