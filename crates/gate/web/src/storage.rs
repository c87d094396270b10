//! `window.localStorage` backend.

use legend_gate_store::{KeyValueBackend, StorageError, StorageResult};
use tracing::warn;
use wasm_bindgen::JsValue;

/// [`KeyValueBackend`] over the browser's `Storage` object.
#[derive(Debug, Clone)]
pub struct LocalStorageBackend(web_sys::Storage);

impl LocalStorageBackend {
    pub fn new(storage: web_sys::Storage) -> Self {
        Self(storage)
    }

    /// The current window's `localStorage`.
    ///
    /// `None` when there is no window or the browser refuses access (privacy
    /// mode, sandboxed iframe). Callers hand the `Option` straight to the
    /// gate, which then treats every visitor as new.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self(storage)),
            Ok(None) => {
                warn!("localStorage is not available");
                None
            }
            Err(e) => {
                warn!(error = ?e, "localStorage access denied");
                None
            }
        }
    }
}

fn backend_error(e: JsValue) -> StorageError {
    StorageError::Backend(format!("{e:?}"))
}

impl KeyValueBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.0.get_item(key).map_err(backend_error)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.0.set_item(key, value).map_err(backend_error)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.0.remove_item(key).map_err(backend_error)
    }
}
