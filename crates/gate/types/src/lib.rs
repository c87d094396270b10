//! Legend Gate Types — the visitor identity and the knobs of the access gate.
//!
//! The gate in front of the Legend architecture map only knows one record: the
//! visitor [`Identity`]. It is an email address (always required) and a display
//! name (required only when the gate runs as a two-field sign-in page).
//!
//! ## Invariants
//!
//! - **Normalized on construction**: an [`EmailAddress`] is trimmed and
//!   lower-cased, a [`DisplayName`] is trimmed. Parsing an already-normalized
//!   value yields the same value.
//! - **No partial identities**: an [`Identity`] built for a [`CaptureMode`] that
//!   requires a name always carries one.
//! - **One gate, two variants**: the email-only gate and the name+email sign-in
//!   page are presets of the same [`GateConfig`].

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod identity;

pub use config::{CaptureMode, GateConfig, Route, StorageKeys};
pub use error::{IdentityError, IdentityResult};
pub use identity::{DisplayName, EmailAddress, Identity};
