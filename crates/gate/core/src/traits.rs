use std::rc::Rc;
use std::sync::Arc;

use legend_gate_types::{Identity, Route};
use tracing::debug;

/// Analytics identification — implemented by the product-usage client.
///
/// Best effort and fire-and-forget. Implementations must not panic and must
/// return promptly; an unavailable client is a silent no-op.
pub trait IdentificationSink {
    /// Tell the analytics service who the visitor is.
    fn identify(&self, identity: &Identity);
}

/// Sink used when no analytics client is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl IdentificationSink for NoopSink {
    fn identify(&self, identity: &Identity) {
        debug!(email = %identity.email(), "no identification sink configured");
    }
}

impl<T: IdentificationSink + ?Sized> IdentificationSink for &T {
    fn identify(&self, identity: &Identity) {
        (**self).identify(identity)
    }
}

impl<T: IdentificationSink + ?Sized> IdentificationSink for Rc<T> {
    fn identify(&self, identity: &Identity) {
        (**self).identify(identity)
    }
}

impl<T: IdentificationSink + ?Sized> IdentificationSink for Arc<T> {
    fn identify(&self, identity: &Identity) {
        (**self).identify(identity)
    }
}

impl<T: IdentificationSink> IdentificationSink for Option<T> {
    fn identify(&self, identity: &Identity) {
        if let Some(sink) = self {
            sink.identify(identity);
        }
    }
}

/// How a navigation treats the history stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationMode {
    /// Add an entry; Back returns to the current screen.
    Push,
    /// Overwrite the current entry; Back skips the current screen.
    Replace,
}

/// A navigation request as seen by a [`Navigator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub mode: NavigationMode,
    pub route: Route,
}

/// Route-change primitive of the host application.
pub trait Navigator {
    /// Navigate to `route`, adding a history entry.
    fn push(&self, route: &Route);

    /// Navigate to `route`, replacing the current history entry.
    fn replace(&self, route: &Route);

    fn navigate(&self, navigation: &Navigation) {
        match navigation.mode {
            NavigationMode::Push => self.push(&navigation.route),
            NavigationMode::Replace => self.replace(&navigation.route),
        }
    }
}

/// Navigator for hosts without routing; requests are logged and dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn push(&self, route: &Route) {
        debug!(route = %route, "navigation ignored (push)");
    }

    fn replace(&self, route: &Route) {
        debug!(route = %route, "navigation ignored (replace)");
    }
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn push(&self, route: &Route) {
        (**self).push(route)
    }

    fn replace(&self, route: &Route) {
        (**self).replace(route)
    }
}

impl<T: Navigator + ?Sized> Navigator for Rc<T> {
    fn push(&self, route: &Route) {
        (**self).push(route)
    }

    fn replace(&self, route: &Route) {
        (**self).replace(route)
    }
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn push(&self, route: &Route) {
        (**self).push(route)
    }

    fn replace(&self, route: &Route) {
        (**self).replace(route)
    }
}
