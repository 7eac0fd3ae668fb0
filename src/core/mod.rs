//! Entry collection logic and the storage-backed entry store.

/// Pure insert/replace/remove over an ordered entry list.
pub mod collection;
/// Storage-backed owner of the entry collection.
pub mod store;
