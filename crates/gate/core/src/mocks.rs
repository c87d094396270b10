use std::cell::RefCell;

use legend_gate_store::{KeyValueBackend, StorageError, StorageResult};
use legend_gate_types::{Identity, Route};

use crate::traits::{IdentificationSink, Navigation, NavigationMode, Navigator};

/// Mock sink for testing.
///
/// Records every identity it is handed, in call order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: RefCell<Vec<Identity>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Identity> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl IdentificationSink for RecordingSink {
    fn identify(&self, identity: &Identity) {
        self.calls.borrow_mut().push(identity.clone());
    }
}

/// Mock navigator for testing.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    navigations: RefCell<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> Vec<Navigation> {
        self.navigations.borrow().clone()
    }

    pub fn count(&self, mode: NavigationMode) -> usize {
        self.navigations
            .borrow()
            .iter()
            .filter(|n| n.mode == mode)
            .count()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: &Route) {
        self.navigations.borrow_mut().push(Navigation {
            mode: NavigationMode::Push,
            route: route.clone(),
        });
    }

    fn replace(&self, route: &Route) {
        self.navigations.borrow_mut().push(Navigation {
            mode: NavigationMode::Replace,
            route: route.clone(),
        });
    }
}

/// Backend that refuses every call, like storage disabled by the browser.
#[derive(Debug, Default)]
pub struct FailingBackend {
    attempts: RefCell<usize>,
}

impl FailingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls made against this backend.
    pub fn attempts(&self) -> usize {
        *self.attempts.borrow()
    }

    fn refuse<T>(&self) -> StorageResult<T> {
        *self.attempts.borrow_mut() += 1;
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}

impl KeyValueBackend for FailingBackend {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        self.refuse()
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        self.refuse()
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        self.refuse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legend_gate_types::CaptureMode;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        let a = Identity::capture(CaptureMode::EmailOnly, "a@b.com", "").unwrap();
        let b = Identity::capture(CaptureMode::EmailOnly, "b@b.com", "").unwrap();
        sink.identify(&a);
        sink.identify(&b);
        assert_eq!(sink.calls(), vec![a, b]);
    }

    #[test]
    fn failing_backend_counts_attempts() {
        let backend = FailingBackend::new();
        assert!(backend.get("k").is_err());
        assert!(backend.set("k", "v").is_err());
        assert_eq!(backend.attempts(), 2);
    }
}
