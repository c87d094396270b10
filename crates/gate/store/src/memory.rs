//! In-memory backend.
//!
//! Deterministic and test-friendly. Contents last as long as the value does,
//! which makes it a per-process session store outside the browser.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::backend::KeyValueBackend;
use crate::{StorageError, StorageResult};

/// In-memory key-value backend.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the backend, e.g. to simulate a returning visitor.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Copy of every stored entry.
    pub fn snapshot(&self) -> StorageResult<BTreeMap<String, String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| StorageError::Backend("entries lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

impl KeyValueBackend for InMemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| StorageError::Backend("entries lock poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StorageError::Backend("entries lock poisoned".to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StorageError::Backend("entries lock poisoned".to_string()))?;
        guard.remove(key);
        Ok(())
    }
}
