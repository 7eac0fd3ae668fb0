use chrono::{DateTime, Utc};
use hashbrown::HashSet;

use crate::{
    entry::{ContestEntry, EntryDraft},
    op::Change,
    types::EntryId,
};

/// Inserts or replaces `draft` in `entries`.
///
/// A draft whose id matches a stored entry replaces it at the same position,
/// keeping `created_at`. Any other draft is appended under a fresh id.
pub fn upsert(entries: &mut Vec<ContestEntry>, draft: EntryDraft, now: DateTime<Utc>) -> Change {
    if let Some(index) = draft.id.and_then(|id| position(entries, id)) {
        let before = entries[index].clone();
        let after = ContestEntry {
            id: before.id,
            name: draft.name,
            department: draft.department,
            photo_title: draft.photo_title,
            created_at: before.created_at,
            updated_at: Some(now),
        };
        entries[index] = after.clone();
        return Change::Updated {
            index,
            before,
            after,
        };
    }

    let entry = ContestEntry {
        id: next_id(entries, now),
        name: draft.name,
        department: draft.department,
        photo_title: draft.photo_title,
        created_at: Some(now),
        updated_at: None,
    };
    entries.push(entry.clone());
    Change::Inserted { entry }
}

/// Removes the entry with `id`; a missing id leaves `entries` untouched.
pub fn remove(entries: &mut Vec<ContestEntry>, id: EntryId) -> Change {
    match position(entries, id) {
        Some(index) => Change::Removed {
            entry: entries.remove(index),
        },
        None => Change::Missing { id },
    }
}

/// Creation-time id, bumped past every stored id so two entries created in
/// the same millisecond stay distinct.
///
/// When the largest stored id is `EntryId::MAX` there is nothing above it, so
/// the lowest unused id is taken instead.
pub fn next_id(entries: &[ContestEntry], now: DateTime<Utc>) -> EntryId {
    let now_ms = EntryId::try_from(now.timestamp_millis()).unwrap_or(0);
    let mut after_max = 0;
    for entry in entries {
        match entry.id.checked_add(1) {
            Some(next) => after_max = after_max.max(next),
            None => return lowest_unused_id(entries),
        }
    }
    now_ms.max(after_max)
}

fn lowest_unused_id(entries: &[ContestEntry]) -> EntryId {
    let taken: HashSet<EntryId> = entries.iter().map(|e| e.id).collect();
    // At most `entries.len()` ids are taken, so one of the first len+1 is free.
    (0..).find(|id| !taken.contains(id)).unwrap_or_default()
}

pub fn position(entries: &[ContestEntry], id: EntryId) -> Option<usize> {
    entries.iter().position(|e| e.id == id)
}

/// Drops later duplicates of an id, returning how many were dropped.
pub fn dedupe_ids(entries: &mut Vec<ContestEntry>) -> usize {
    let mut seen: HashSet<EntryId> = HashSet::with_capacity(entries.len());
    let before = entries.len();
    entries.retain(|e| seen.insert(e.id));
    before - entries.len()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn same_millisecond_inserts_get_distinct_ids() {
        let mut entries = Vec::new();
        let now = at(1_700_000_000_000);
        let a = upsert(&mut entries, EntryDraft::new("Ada", "Physics", "Nebula"), now);
        let b = upsert(&mut entries, EntryDraft::new("Bob", "Maths", "Dunes"), now);
        assert_eq!(a.id(), 1_700_000_000_000);
        assert_eq!(b.id(), 1_700_000_000_001);
    }

    #[test]
    fn stale_id_is_appended_as_new_entry() {
        let mut entries = Vec::new();
        let change = upsert(
            &mut entries,
            EntryDraft::new("Ada", "Physics", "Nebula").with_id(42),
            at(5_000),
        );
        assert!(matches!(change, Change::Inserted { .. }));
        assert_eq!(entries[0].id, 5_000);
    }

    #[test]
    fn max_id_falls_back_to_lowest_free_id() {
        let mut entries = Vec::new();
        upsert(&mut entries, EntryDraft::new("Ada", "Physics", "Nebula"), at(0));
        entries[0].id = EntryId::MAX;
        upsert(&mut entries, EntryDraft::new("Bob", "Maths", "Dunes"), at(9_000));
        upsert(&mut entries, EntryDraft::new("Cy", "Art", "Reeds"), at(9_000));
        let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntryId::MAX, 0, 1]);
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let entry = |id, name: &str| ContestEntry {
            id,
            name: name.to_string(),
            department: "Dept".to_string(),
            photo_title: "Title".to_string(),
            created_at: None,
            updated_at: None,
        };
        let mut entries = vec![entry(1, "first"), entry(2, "other"), entry(1, "second")];
        assert_eq!(dedupe_ids(&mut entries), 1);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "first");
    }
}
