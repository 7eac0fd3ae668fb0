use chrono::{TimeZone, Utc};
use hashbrown::HashSet;
use proptest::prelude::*;

use entrybook::{
    core::store::EntryStore,
    entry::{ContestEntry, EntryDraft},
    persist::memory::MemoryStorage,
    types::EntryId,
};

#[derive(Debug, Clone)]
enum Action {
    Add { name_idx: u8, at_ms: u16 },
    Edit { target: u8, title_idx: u8, at_ms: u16 },
    EditStale { id: u16 },
    Remove { target: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..24, 0u16..50).prop_map(|(name_idx, at_ms)| Action::Add { name_idx, at_ms }),
        (0u8..24, 0u8..24, 0u16..50)
            .prop_map(|(target, title_idx, at_ms)| Action::Edit { target, title_idx, at_ms }),
        (0u16..1000).prop_map(|id| Action::EditStale { id }),
        (0u8..24).prop_map(|target| Action::Remove { target }),
    ]
}

fn ids(entries: &[ContestEntry]) -> Vec<EntryId> {
    entries.iter().map(|e| e.id).collect()
}

fn entry_strategy() -> impl Strategy<Value = ContestEntry> {
    (any::<u64>(), "[A-Za-z ]{2,20}", "[A-Za-z&<> ]{2,20}", "\\PC{2,30}").prop_map(
        |(id, name, department, photo_title)| ContestEntry {
            id,
            name,
            department,
            photo_title,
            created_at: None,
            updated_at: None,
        },
    )
}

proptest! {
    #[test]
    fn ids_stay_unique_across_any_upsert_sequence(actions in prop::collection::vec(action_strategy(), 1..120)) {
        let mut store = EntryStore::new(MemoryStorage::new());
        // Coarse clock so many inserts collide on the same millisecond.
        let base = 1_700_000_000_000i64;

        for action in actions {
            match action {
                Action::Add { name_idx, at_ms } => {
                    let now = Utc.timestamp_millis_opt(base + i64::from(at_ms)).unwrap();
                    store.upsert_at(EntryDraft::new(format!("Name {name_idx}"), "Dept", "Title"), now).unwrap();
                }
                Action::Edit { target, title_idx, at_ms } => {
                    let entries = store.load();
                    if entries.is_empty() {
                        continue;
                    }
                    let victim = &entries[usize::from(target) % entries.len()];
                    let now = Utc.timestamp_millis_opt(base + i64::from(at_ms)).unwrap();
                    let before_len = entries.len();
                    let applied = store
                        .upsert_at(
                            EntryDraft::new(victim.name.clone(), "Dept", format!("Title {title_idx}")).with_id(victim.id),
                            now,
                        )
                        .unwrap();
                    prop_assert_eq!(applied.entries.len(), before_len);
                }
                Action::EditStale { id } => {
                    let now = Utc.timestamp_millis_opt(base).unwrap();
                    store
                        .upsert_at(EntryDraft::new("Stale", "Dept", "Title").with_id(u64::from(id)), now)
                        .unwrap();
                }
                Action::Remove { target } => {
                    let entries = store.load();
                    if entries.is_empty() {
                        continue;
                    }
                    let id = entries[usize::from(target) % entries.len()].id;
                    store.remove(id).unwrap();
                }
            }

            let current = ids(&store.load());
            let distinct: HashSet<EntryId> = current.iter().copied().collect();
            prop_assert_eq!(distinct.len(), current.len());
        }
    }

    #[test]
    fn remove_is_idempotent(count in 1usize..12, pick in any::<prop::sample::Index>()) {
        let mut store = EntryStore::new(MemoryStorage::new());
        for i in 0..count {
            store.upsert(EntryDraft::new(format!("Name {i}"), "Dept", "Title")).unwrap();
        }
        let id = store.load()[pick.index(count)].id;

        let once = store.remove(id).unwrap().entries;
        let twice = store.remove(id).unwrap().entries;
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.len(), count - 1);
        prop_assert!(!ids(&store.load()).contains(&id));
    }

    #[test]
    fn save_then_load_round_trips(entries in prop::collection::vec(entry_strategy(), 0..20)) {
        let mut unique = entries;
        let mut seen = HashSet::new();
        unique.retain(|e| seen.insert(e.id));

        let mut store = EntryStore::new(MemoryStorage::new());
        store.save(&unique).unwrap();
        prop_assert_eq!(store.load(), unique);
    }
}
