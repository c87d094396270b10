use std::rc::Rc;
use std::sync::Arc;

use crate::{StorageError, StorageResult};

/// String-valued key-value storage that survives reloads.
///
/// Implementations are synchronous: every call completes within the current
/// event turn. Methods take `&self`; backends that need mutation use interior
/// mutability, as the browser's own `Storage` object does.
pub trait KeyValueBackend {
    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueBackend + ?Sized> KeyValueBackend for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueBackend + ?Sized> KeyValueBackend for Rc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueBackend + ?Sized> KeyValueBackend for Arc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// A backend that may not exist at all (storage disabled, private mode).
///
/// `None` behaves as storage that refuses every call.
impl<T: KeyValueBackend> KeyValueBackend for Option<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Some(backend) => backend.get(key),
            None => Err(StorageError::Unavailable("no storage backend".into())),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            Some(backend) => backend.set(key, value),
            None => Err(StorageError::Unavailable("no storage backend".into())),
        }
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match self {
            Some(backend) => backend.remove(key),
            None => Err(StorageError::Unavailable("no storage backend".into())),
        }
    }
}
