//! Session Gate — local identity capture in front of the Legend map.
//!
//! The gate decides, once per page load, whether the visitor sees the
//! protected content or the capture form:
//!
//! ```text
//! CaptureForm ─write─▶ IdentityStore
//!      │
//!      └─identify─▶ IdentificationSink
//!                        │
//! SessionGate ◀──────────┘ Unknown ─▶ Authenticated ─▶ ProtectedContent
//!                                 └─▶ Unauthenticated ─▶ CaptureForm
//! ```
//!
//! ## Guarantees
//!
//! - **One read per mount**: storage is consulted exactly once, on
//!   [`SessionGate::mount`]. Later renders use the in-memory state.
//! - **One identify per sign-in**: the sink is called once for a returning
//!   visitor and once for each accepted submission, never for rejected input.
//! - **All or nothing**: a submission either writes, identifies and
//!   transitions, or leaves the gate on the form without identifying. A
//!   failed write never leaves a partial record, and one for the email
//!   already stored keeps that email readable.
//! - **Degrade to the form**: unusable storage and a missing analytics client
//!   never block the visitor; at worst they are asked to sign in again.
//!
//! Nothing here verifies who the visitor is. The stored identity is trusted
//! at face value.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod boundary;
pub mod error;
pub mod form;
pub mod gate;
pub mod mocks;
pub mod traits;

pub use boundary::{ProtectedContent, Rendered};
pub use error::{GateError, GateResult};
pub use form::{CaptureForm, Submission};
pub use gate::{GateView, SessionGate, SessionState};
pub use mocks::{FailingBackend, RecordingNavigator, RecordingSink};
pub use traits::{IdentificationSink, Navigation, NavigationMode, Navigator, NoopNavigator, NoopSink};

pub use legend_gate_store::{IdentityStore, InMemoryBackend, KeyValueBackend, StorageError};
pub use legend_gate_types::{CaptureMode, GateConfig, Identity, IdentityError, Route};
