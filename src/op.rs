//! Mutation outcomes reported by the entry store.

use crate::{entry::ContestEntry, types::EntryId};

/// What a single store mutation did to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A new entry was appended.
    Inserted {
        /// Appended entry.
        entry: ContestEntry,
    },
    /// An existing entry was replaced in place.
    Updated {
        /// Position of the entry in display order.
        index: usize,
        /// Entry before the edit.
        before: ContestEntry,
        /// Entry after the edit.
        after: ContestEntry,
    },
    /// An entry was removed.
    Removed {
        /// Removed entry.
        entry: ContestEntry,
    },
    /// Removal of an id that is not stored; nothing changed.
    Missing {
        /// Requested id.
        id: EntryId,
    },
}

impl Change {
    /// Id of the entry the mutation targeted.
    pub fn id(&self) -> EntryId {
        match self {
            Change::Inserted { entry } | Change::Removed { entry } => entry.id,
            Change::Updated { after, .. } => after.id,
            Change::Missing { id } => *id,
        }
    }

    /// True when the collection differs from before the mutation.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Change::Missing { .. })
    }
}
