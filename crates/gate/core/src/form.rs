use legend_gate_store::{IdentityStore, KeyValueBackend, StorageError};
use legend_gate_types::{CaptureMode, Identity, IdentityError};
use tracing::{debug, info, warn};

use crate::traits::IdentificationSink;

/// Outcome of a capture form submission.
#[derive(Debug)]
pub enum Submission {
    /// Written and identified; the gate may authenticate.
    Accepted(Identity),
    /// Input failed validation. Nothing was written or identified.
    Ignored(IdentityError),
    /// Input was valid but storage refused it. Nothing was identified.
    NotPersisted(StorageError),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Submission::Accepted(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Uncommitted visitor input.
///
/// Holds raw text exactly as typed; normalization happens on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureForm {
    mode: CaptureMode,
    email: String,
    name: String,
}

impl CaptureForm {
    pub fn new(mode: CaptureMode) -> Self {
        Self {
            mode,
            email: String::new(),
            name: String::new(),
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Whether the form shows a name field as required.
    pub fn requires_name(&self) -> bool {
        self.mode.requires_name()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn reset(&mut self) {
        self.email.clear();
        self.name.clear();
    }

    /// Normalize and validate the current input without side effects.
    pub fn validate(&self) -> Result<Identity, IdentityError> {
        Identity::capture(self.mode, &self.email, &self.name)
    }

    /// Commit the input: write it, then identify it.
    ///
    /// Resubmitting the same values writes an identical record and identifies
    /// again, which is what a second click on "Continue" should do.
    pub fn submit<B, S>(&self, store: &IdentityStore<B>, sink: &S) -> Submission
    where
        B: KeyValueBackend,
        S: IdentificationSink + ?Sized,
    {
        let identity = match self.validate() {
            Ok(identity) => identity,
            Err(e) => {
                debug!(reason = %e, "capture form submission ignored");
                return Submission::Ignored(e);
            }
        };

        if let Err(e) = store.write(&identity) {
            warn!(error = %e, "could not persist identity; staying on the form");
            return Submission::NotPersisted(e);
        }

        sink.identify(&identity);
        info!(email = %identity.email(), "visitor signed in");

        Submission::Accepted(identity)
    }
}
