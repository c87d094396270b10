use std::fmt;

use legend_gate_store::{IdentityStore, KeyValueBackend};
use legend_gate_types::{GateConfig, Identity, Route};
use tracing::{debug, info};

use crate::error::{GateError, GateResult};
use crate::form::{CaptureForm, Submission};
use crate::traits::{IdentificationSink, Navigation, NavigationMode, Navigator};

/// Where the gate stands for this page load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Storage not consulted yet.
    Unknown,
    /// No usable identity; the capture form is showing.
    Unauthenticated,
    /// Identity known; protected content is showing.
    Authenticated(Identity),
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unknown => "unknown",
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticated(_) => "authenticated",
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the host should draw right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateView<'a> {
    /// Not mounted yet; draw nothing.
    Pending,
    /// Draw the capture form.
    CaptureForm(&'a CaptureForm),
    /// Draw the protected content for this visitor.
    Protected(&'a Identity),
}

/// The Session Gate.
///
/// One instance per page load. Storage is read exactly once, in
/// [`mount`](Self::mount); after that the gate moves only on a successful
/// [`submit`](Self::submit) or an explicit [`sign_out`](Self::sign_out).
///
/// Whether a name is required and where to go after authentication are
/// both taken from [`GateConfig`], so the email-only gate and the sign-in
/// page are the same component.
pub struct SessionGate<B, S, N> {
    config: GateConfig,
    store: IdentityStore<B>,
    sink: S,
    navigator: N,
    state: SessionState,
    form: CaptureForm,
}

impl<B, S, N> SessionGate<B, S, N>
where
    B: KeyValueBackend,
    S: IdentificationSink,
    N: Navigator,
{
    /// Create an unmounted gate over `backend`.
    pub fn new(config: GateConfig, backend: B, sink: S, navigator: N) -> Self {
        let store = IdentityStore::new(backend, config.storage_keys.clone(), config.capture);
        let form = CaptureForm::new(config.capture);
        Self {
            config,
            store,
            sink,
            navigator,
            state: SessionState::Unknown,
            form,
        }
    }

    /// Configuration accessor.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &IdentityStore<B> {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// The signed-in visitor, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// Evaluate storage. Runs once; later calls return the current state
    /// without touching storage.
    ///
    /// A returning visitor is identified and, when a next route is
    /// configured, sent there with the current history entry replaced so
    /// Back does not land on the sign-in screen again.
    pub fn mount(&mut self) -> &SessionState {
        if self.state != SessionState::Unknown {
            debug!(state = %self.state, "gate already evaluated; skipping storage read");
            return &self.state;
        }

        match self.store.read() {
            Some(identity) => {
                info!(email = %identity.email(), "returning visitor");
                self.sink.identify(&identity);
                self.authenticate(identity, NavigationMode::Replace);
            }
            None => {
                info!("no stored identity; showing capture form");
                self.state = SessionState::Unauthenticated;
            }
        }

        &self.state
    }

    /// The capture form, while it is showing.
    pub fn form(&self) -> Option<&CaptureForm> {
        match self.state {
            SessionState::Unauthenticated => Some(&self.form),
            _ => None,
        }
    }

    /// Mutable access to the capture form, while it is showing.
    pub fn form_mut(&mut self) -> Option<&mut CaptureForm> {
        match self.state {
            SessionState::Unauthenticated => Some(&mut self.form),
            _ => None,
        }
    }

    /// Submit the capture form.
    ///
    /// Invalid input and storage failures come back as a non-accepted
    /// [`Submission`] and leave the gate on the form. An accepted submission
    /// authenticates in place, and follows the configured next route with a
    /// regular (push) navigation.
    ///
    /// # Errors
    ///
    /// [`GateError::InvalidTransition`] unless the form is showing.
    pub fn submit(&mut self) -> GateResult<Submission> {
        if self.state != SessionState::Unauthenticated {
            return Err(GateError::InvalidTransition {
                from: self.state.label().to_string(),
                action: "submit".to_string(),
            });
        }

        let submission = self.form.submit(&self.store, &self.sink);
        if let Submission::Accepted(identity) = &submission {
            self.form.reset();
            self.authenticate(identity.clone(), NavigationMode::Push);
        }

        Ok(submission)
    }

    /// Forget the visitor: clear storage and show the form again.
    ///
    /// # Errors
    ///
    /// [`GateError::Storage`] if storage could not be cleared; the gate keeps
    /// its current state in that case.
    pub fn sign_out(&mut self) -> GateResult<()> {
        self.store.clear()?;
        info!(from = %self.state, "visitor signed out");
        self.form.reset();
        self.state = SessionState::Unauthenticated;
        Ok(())
    }

    /// Landing-page entry: open the sign-in screen as a new history entry.
    pub fn begin_sign_in(&self, route: &Route) {
        debug!(route = %route, "opening sign-in");
        self.navigator.push(route);
    }

    /// What to draw for the current state.
    pub fn view(&self) -> GateView<'_> {
        match &self.state {
            SessionState::Unknown => GateView::Pending,
            SessionState::Unauthenticated => GateView::CaptureForm(&self.form),
            SessionState::Authenticated(identity) => GateView::Protected(identity),
        }
    }

    fn authenticate(&mut self, identity: Identity, mode: NavigationMode) {
        self.state = SessionState::Authenticated(identity);

        if let Some(route) = &self.config.next_route {
            info!(route = %route, ?mode, "forwarding authenticated visitor");
            self.navigator.navigate(&Navigation {
                mode,
                route: route.clone(),
            });
        }
    }
}

impl<B, S, N> fmt::Debug for SessionGate<B, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}
