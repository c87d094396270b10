use legend_gate_store::KeyValueBackend;
use legend_gate_types::Identity;

use crate::form::CaptureForm;
use crate::gate::{GateView, SessionGate};
use crate::traits::{IdentificationSink, Navigator};

/// Result of rendering a [`ProtectedContent`] boundary.
#[derive(Debug, PartialEq, Eq)]
pub enum Rendered<'a, C> {
    /// The wrapped children, untouched.
    Children(&'a C, &'a Identity),
    /// The capture form in place of the children.
    CaptureForm(&'a CaptureForm),
    /// Nothing yet; the gate has not been mounted.
    Nothing,
}

impl<'a, C> Rendered<'a, C> {
    pub fn children(&self) -> Option<&'a C> {
        match self {
            Rendered::Children(children, _) => Some(children),
            _ => None,
        }
    }
}

/// Wraps a content subtree and shows it only to an authenticated visitor.
///
/// The boundary never inspects or alters its children.
#[derive(Clone, Debug, Default)]
pub struct ProtectedContent<C> {
    children: C,
}

impl<C> ProtectedContent<C> {
    pub fn new(children: C) -> Self {
        Self { children }
    }

    pub fn into_inner(self) -> C {
        self.children
    }

    pub fn render<'a, B, S, N>(&'a self, gate: &'a SessionGate<B, S, N>) -> Rendered<'a, C>
    where
        B: KeyValueBackend,
        S: IdentificationSink,
        N: Navigator,
    {
        match gate.view() {
            GateView::Pending => Rendered::Nothing,
            GateView::CaptureForm(form) => Rendered::CaptureForm(form),
            GateView::Protected(identity) => Rendered::Children(&self.children, identity),
        }
    }
}
