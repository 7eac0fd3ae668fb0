//! Contest entry book: a locally persisted list of contest entries, the
//! admin panel that edits it, and the registration/contact forms that turn
//! into pre-filled emails.
//!
//! # Examples
//!
//! Storing entries with [`core::store::EntryStore`]:
//! ```
//! use entrybook::{
//!     core::store::EntryStore,
//!     entry::EntryDraft,
//!     persist::memory::MemoryStorage,
//! };
//!
//! let mut store = EntryStore::new(MemoryStorage::new());
//! let applied = store
//!     .upsert(EntryDraft::new("Ada Lovelace", "Physics", "Nebula"))
//!     .expect("save");
//! assert_eq!(applied.entries.len(), 1);
//!
//! let id = applied.entries[0].id;
//! store.remove(id).expect("save");
//! assert!(store.load().is_empty());
//! ```
//!
//! Checking a field:
//! ```
//! use entrybook::validate::{validate, Rule};
//!
//! assert!(validate("john@x.co", Rule::Email).is_pass());
//! assert!(!validate("12345", Rule::Phone).is_pass());
//! ```
#![warn(missing_docs)]

/// Application configuration.
pub mod config;
/// Entry collection logic and the storage-backed store.
pub mod core;
/// Contest entry records.
pub mod entry;
/// Form controllers and the page surface traits.
pub mod forms;
/// Tracing setup.
pub mod logging;
/// `mailto:` link composition.
pub mod mailto;
/// User-facing notifications.
pub mod notify;
/// Store mutation outcomes.
pub mod op;
/// Key-value storage abstraction and backends.
pub mod persist;
/// Table rendering of stored entries.
pub mod render;
/// Shared primitive types.
pub mod types;
/// Field format rules.
pub mod validate;
