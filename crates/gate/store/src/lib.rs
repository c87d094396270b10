//! Legend identity storage.
//!
//! Durable local storage is a flat string key-value space (browser
//! `localStorage`, or a JSON file for the CLI). [`IdentityStore`] layers the
//! identity record over it:
//! - `read` yields a complete [`Identity`](legend_gate_types::Identity) or nothing
//! - `write` persists every field, email last
//! - `clear` removes every field, email first
//!
//! The email key doubles as the commit marker, so a reader never sees a
//! valid-looking record with some fields missing, even if a write or clear is
//! cut short half way.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod backend;
mod error;
pub mod file;
pub mod memory;
mod store;

pub use backend::KeyValueBackend;
pub use error::{StorageError, StorageResult};
pub use file::JsonFileBackend;
pub use memory::InMemoryBackend;
pub use store::IdentityStore;
