//! Contest entry record and the draft submitted from the admin form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::EntryId;

/// Persisted contest entry.
///
/// Field names on the wire follow the stored blob layout
/// (`dept`, `title`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestEntry {
    /// Stable entry identifier.
    pub id: EntryId,
    /// Participant name.
    pub name: String,
    /// Participant department.
    #[serde(rename = "dept")]
    pub department: String,
    /// Title of the submitted photograph.
    #[serde(rename = "title")]
    pub photo_title: String,
    /// Creation time, absent on records written before it was tracked.
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Time of the last edit.
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert-or-update payload.
///
/// `id: None` creates a new entry; `Some(id)` replaces the entry with that id
/// when it exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryDraft {
    /// Target entry for an edit.
    pub id: Option<EntryId>,
    /// Participant name.
    pub name: String,
    /// Participant department.
    pub department: String,
    /// Title of the submitted photograph.
    pub photo_title: String,
}

impl EntryDraft {
    /// Draft for a brand-new entry.
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        photo_title: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            department: department.into(),
            photo_title: photo_title.into(),
        }
    }

    /// Same draft targeting an existing entry.
    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns a copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            department: self.department.trim().to_string(),
            photo_title: self.photo_title.trim().to_string(),
        }
    }
}

impl From<&ContestEntry> for EntryDraft {
    fn from(entry: &ContestEntry) -> Self {
        Self {
            id: Some(entry.id),
            name: entry.name.clone(),
            department: entry.department.clone(),
            photo_title: entry.photo_title.clone(),
        }
    }
}
