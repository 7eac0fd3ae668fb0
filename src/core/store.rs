use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    entry::{ContestEntry, EntryDraft},
    op::Change,
    persist::{KvStorage, StorageError},
    types::{DEFAULT_STORAGE_KEY, EntryId},
};

use super::collection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to save entries: {0}")]
    Write(#[from] StorageError),
    #[error("entry {0} not found")]
    NotFound(EntryId),
}

/// Result of a successful mutation: the collection as now persisted plus what
/// changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub entries: Vec<ContestEntry>,
    pub change: Change,
}

/// Sole owner of the persisted entry collection.
///
/// Every mutation reads the blob, applies the change and writes the whole
/// collection back under one key.
pub struct EntryStore<S: KvStorage> {
    storage: S,
    key: String,
}

impl<S: KvStorage> EntryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads the stored collection.
    ///
    /// Missing, unreadable or malformed data yields an empty list.
    pub fn load(&self) -> Vec<ContestEntry> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "error loading entries");
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        let mut entries: Vec<ContestEntry> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(key = %self.key, error = %err, "error parsing stored entries");
                return Vec::new();
            }
        };

        let dropped = collection::dedupe_ids(&mut entries);
        if dropped > 0 {
            warn!(key = %self.key, dropped, "dropped entries with duplicate ids");
        }
        entries
    }

    /// Overwrites the stored collection with `entries`.
    pub fn save(&mut self, entries: &[ContestEntry]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(entries)?;
        self.storage.set(&self.key, &payload).inspect_err(|err| {
            error!(key = %self.key, error = %err, "error saving entries");
        })
    }

    pub fn upsert(&mut self, candidate: EntryDraft) -> Result<Applied, StoreError> {
        self.upsert_at(candidate, Utc::now())
    }

    /// [`EntryStore::upsert`] with an explicit clock reading.
    pub fn upsert_at(
        &mut self,
        candidate: EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<Applied, StoreError> {
        let mut entries = self.load();
        let change = collection::upsert(&mut entries, candidate, now);
        self.save(&entries)?;
        debug!(id = change.id(), len = entries.len(), "entry upserted");
        Ok(Applied { entries, change })
    }

    /// Removes `id`. An unknown id is not an error; the returned change is
    /// [`Change::Missing`] and nothing is written.
    pub fn remove(&mut self, id: EntryId) -> Result<Applied, StoreError> {
        let mut entries = self.load();
        let change = collection::remove(&mut entries, id);
        if change.is_mutation() {
            self.save(&entries)?;
            debug!(id, len = entries.len(), "entry removed");
        }
        Ok(Applied { entries, change })
    }

    pub fn get(&self, id: EntryId) -> Option<ContestEntry> {
        self.load().into_iter().find(|e| e.id == id)
    }

    pub fn find(&self, id: EntryId) -> Result<ContestEntry, StoreError> {
        self.get(id).ok_or(StoreError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
