//! Shared primitive IDs and small enums.

use serde::{Deserialize, Serialize};

/// Contest entry identifier, derived from the creation time in milliseconds.
pub type EntryId = u64;

/// Element identifier of a form field on the page.
pub type FieldId = &'static str;

/// Storage key used by the admin panel when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "lensLightContestEntries";

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Operation succeeded.
    Success,
    /// Operation failed or was blocked.
    Error,
}
