use legend_gate_types::{CaptureMode, DisplayName, EmailAddress, Identity, StorageKeys};
use tracing::{debug, warn};

use crate::backend::KeyValueBackend;
use crate::StorageResult;

/// The persisted visitor identity, layered over a [`KeyValueBackend`].
///
/// Holds at most one identity. Storage is re-read on every call and never
/// cached, so the backend stays the single source of truth.
#[derive(Debug)]
pub struct IdentityStore<B> {
    backend: B,
    keys: StorageKeys,
    mode: CaptureMode,
}

impl<B: KeyValueBackend> IdentityStore<B> {
    pub fn new(backend: B, keys: StorageKeys, mode: CaptureMode) -> Self {
        Self {
            backend,
            keys,
            mode,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Read the stored identity, surfacing backend failures.
    ///
    /// Returns `Ok(None)` when the email is missing or malformed, or when the
    /// capture mode requires a name that is not stored.
    pub fn try_read(&self) -> StorageResult<Option<Identity>> {
        let Some(raw_email) = self.backend.get(&self.keys.email)? else {
            debug!(key = %self.keys.email, "no stored identity");
            return Ok(None);
        };

        let email = match EmailAddress::parse(&raw_email) {
            Ok(email) => email,
            Err(e) => {
                warn!(key = %self.keys.email, error = %e, "ignoring malformed stored email");
                return Ok(None);
            }
        };

        let name = self
            .backend
            .get(&self.keys.name)?
            .and_then(|raw| DisplayName::parse(&raw).ok());

        let identity = Identity::new(email, name);
        if !identity.satisfies(self.mode) {
            debug!(email = %identity.email(), "stored identity is incomplete for this gate");
            return Ok(None);
        }

        Ok(Some(identity))
    }

    /// Read the stored identity, treating an unusable backend as empty.
    pub fn read(&self) -> Option<Identity> {
        match self.try_read() {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "identity storage unavailable; treating as signed out");
                None
            }
        }
    }

    /// Persist every field of `identity`, replacing whatever was stored.
    ///
    /// The email is written last. When it changes, the old one is dropped
    /// first so a failed write can never pair it with the new name. When it
    /// stays the same it is left in place, so a failed write keeps the
    /// previous record readable.
    pub fn write(&self, identity: &Identity) -> StorageResult<()> {
        let email = identity.email().as_str();
        if self.backend.get(&self.keys.email)?.as_deref() != Some(email) {
            self.backend.remove(&self.keys.email)?;
        }

        match identity.name() {
            Some(name) => self.backend.set(&self.keys.name, name.as_str())?,
            None => self.backend.remove(&self.keys.name)?,
        }

        self.backend.set(&self.keys.email, email)?;

        debug!(email = %identity.email(), "identity written");
        Ok(())
    }

    /// Remove every field. Afterwards `read` returns `None`.
    pub fn clear(&self) -> StorageResult<()> {
        self.backend.remove(&self.keys.email)?;
        self.backend.remove(&self.keys.name)?;
        debug!("identity cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use crate::StorageError;
    use legend_gate_types::config::{DEFAULT_EMAIL_KEY, DEFAULT_NAME_KEY};
    use proptest::prelude::*;
    use std::cell::Cell;

    fn store(mode: CaptureMode) -> IdentityStore<InMemoryBackend> {
        IdentityStore::new(InMemoryBackend::new(), StorageKeys::default(), mode)
    }

    fn ann() -> Identity {
        Identity::capture(CaptureMode::NameAndEmail, "a@b.com", "Ann").unwrap()
    }

    /// Fails every `set` once `budget` successful sets are used up.
    struct FlakyBackend {
        inner: InMemoryBackend,
        budget: Cell<usize>,
    }

    impl KeyValueBackend for FlakyBackend {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            if self.budget.get() == 0 {
                return Err(StorageError::Backend("quota exceeded".into()));
            }
            self.budget.set(self.budget.get() - 1);
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn empty_store_reads_none() {
        assert_eq!(store(CaptureMode::EmailOnly).read(), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let store = store(CaptureMode::NameAndEmail);
        store.write(&ann()).unwrap();
        assert_eq!(store.read(), Some(ann()));
    }

    #[test]
    fn writing_twice_is_indistinguishable_from_once() {
        let once = store(CaptureMode::NameAndEmail);
        once.write(&ann()).unwrap();

        let twice = store(CaptureMode::NameAndEmail);
        twice.write(&ann()).unwrap();
        twice.write(&ann()).unwrap();

        assert_eq!(
            once.backend().snapshot().unwrap(),
            twice.backend().snapshot().unwrap()
        );
    }

    #[test]
    fn overwrite_without_name_drops_old_name() {
        let store = store(CaptureMode::EmailOnly);
        store.write(&ann()).unwrap();

        let bob = Identity::capture(CaptureMode::EmailOnly, "bob@b.com", "").unwrap();
        store.write(&bob).unwrap();

        assert_eq!(store.read(), Some(bob));
        assert_eq!(store.backend().get(DEFAULT_NAME_KEY).unwrap(), None);
    }

    #[test]
    fn clear_removes_everything() {
        let store = store(CaptureMode::NameAndEmail);
        store.write(&ann()).unwrap();
        store.clear().unwrap();

        assert_eq!(store.read(), None);
        assert!(store.backend().snapshot().unwrap().is_empty());
    }

    #[test]
    fn email_without_required_name_is_absent() {
        let backend = InMemoryBackend::with_entries([(DEFAULT_EMAIL_KEY, "a@b.com")]);
        let sign_in = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::NameAndEmail);
        assert_eq!(sign_in.read(), None);

        // the email-only gate accepts the same storage
        let gate = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::EmailOnly);
        assert_eq!(
            gate.read().map(|i| i.email().as_str().to_string()),
            Some("a@b.com".to_string())
        );
    }

    #[test]
    fn blank_stored_name_counts_as_missing() {
        let backend = InMemoryBackend::with_entries([
            (DEFAULT_EMAIL_KEY, "a@b.com"),
            (DEFAULT_NAME_KEY, "   "),
        ]);
        let store = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::NameAndEmail);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn malformed_stored_email_is_absent() {
        let backend = InMemoryBackend::with_entries([(DEFAULT_EMAIL_KEY, "not-an-email")]);
        let store = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::EmailOnly);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn stored_email_from_older_site_is_normalized() {
        let backend = InMemoryBackend::with_entries([(DEFAULT_EMAIL_KEY, " Ann@B.com ")]);
        let store = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::EmailOnly);
        assert_eq!(
            store.read().map(|i| i.email().to_string()),
            Some("ann@b.com".to_string())
        );
    }

    #[test]
    fn unavailable_backend_reads_none_but_try_read_errors() {
        let store: IdentityStore<Option<InMemoryBackend>> =
            IdentityStore::new(None, StorageKeys::default(), CaptureMode::EmailOnly);
        assert_eq!(store.read(), None);
        assert!(store.try_read().is_err());
        assert!(store.write(&ann()).is_err());
    }

    #[test]
    fn failed_write_never_leaves_a_valid_looking_record() {
        let backend = FlakyBackend {
            inner: InMemoryBackend::new(),
            budget: Cell::new(1),
        };
        let store = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::EmailOnly);

        // name lands, email does not
        assert!(store.write(&ann()).is_err());
        assert_eq!(store.read(), None);
    }

    #[test]
    fn failed_overwrite_does_not_resurrect_the_old_email() {
        let backend = FlakyBackend {
            inner: InMemoryBackend::new(),
            budget: Cell::new(2),
        };
        let store = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::NameAndEmail);
        store.write(&ann()).unwrap();

        let bob = Identity::capture(CaptureMode::NameAndEmail, "bob@b.com", "Bob").unwrap();
        assert!(store.write(&bob).is_err());

        // neither Ann's email paired with Bob's name nor anything else
        assert_eq!(store.read(), None);
    }

    #[test]
    fn failed_write_for_the_same_email_keeps_the_stored_one() {
        let backend = FlakyBackend {
            inner: InMemoryBackend::with_entries([(DEFAULT_EMAIL_KEY, "a@b.com")]),
            budget: Cell::new(0),
        };
        let sign_in = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::NameAndEmail);

        assert!(sign_in.write(&ann()).is_err());

        assert_eq!(
            backend.get(DEFAULT_EMAIL_KEY).unwrap().as_deref(),
            Some("a@b.com")
        );
        let gate = IdentityStore::new(&backend, StorageKeys::default(), CaptureMode::EmailOnly);
        assert_eq!(
            gate.read().map(|i| i.email().to_string()),
            Some("a@b.com".to_string())
        );
    }

    #[test]
    fn custom_keys_are_honoured() {
        let keys = StorageKeys {
            email: "visitor-email".into(),
            name: "visitor-name".into(),
        };
        let store = IdentityStore::new(InMemoryBackend::new(), keys, CaptureMode::NameAndEmail);
        store.write(&ann()).unwrap();

        let snapshot = store.backend().snapshot().unwrap();
        assert_eq!(snapshot.get("visitor-email").map(String::as_str), Some("a@b.com"));
        assert_eq!(snapshot.get("visitor-name").map(String::as_str), Some("Ann"));
        assert!(!snapshot.contains_key(DEFAULT_EMAIL_KEY));
    }

    proptest! {
        #[test]
        fn any_valid_identity_round_trips(
            local in "[a-zA-Z0-9._]{1,12}",
            domain in "[a-zA-Z0-9.]{1,12}",
            name in proptest::option::of("[a-zA-Z ]{0,3}[a-zA-Z]{1,8}"),
        ) {
            let email = format!("{local}@{domain}");
            let identity =
                Identity::capture(CaptureMode::EmailOnly, &email, name.as_deref().unwrap_or(""))
                    .unwrap();

            let store = store(CaptureMode::EmailOnly);
            store.write(&identity).unwrap();
            prop_assert_eq!(store.read(), Some(identity));
        }
    }
}
