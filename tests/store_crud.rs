use chrono::{TimeZone, Utc};

use entrybook::{
    core::store::{EntryStore, StoreError},
    entry::EntryDraft,
    op::Change,
    persist::{KvStorage, memory::MemoryStorage},
    types::DEFAULT_STORAGE_KEY,
};

fn draft(name: &str, dept: &str, title: &str) -> EntryDraft {
    EntryDraft::new(name, dept, title)
}

#[test]
fn first_entry_yields_one_element_collection() {
    let mut store = EntryStore::new(MemoryStorage::new());
    assert!(store.load().is_empty());

    let applied = store.upsert(draft("Ada Lovelace", "Physics", "Nebula")).unwrap();
    assert_eq!(applied.entries.len(), 1);
    assert!(matches!(applied.change, Change::Inserted { .. }));

    let reloaded = store.load();
    assert_eq!(reloaded, applied.entries);
    assert_eq!(reloaded[0].name, "Ada Lovelace");
    assert!(reloaded[0].created_at.is_some());
    assert!(reloaded[0].updated_at.is_none());
}

#[test]
fn edit_preserves_id_created_at_and_position() {
    let mut store = EntryStore::new(MemoryStorage::new());
    let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let t1 = Utc.timestamp_millis_opt(1_700_000_000_500).unwrap();
    let t2 = Utc.timestamp_millis_opt(1_700_000_100_000).unwrap();

    let first = store.upsert_at(draft("Ada Lovelace", "Physics", "Nebula"), t0).unwrap();
    store.upsert_at(draft("Grace Hopper", "Computing", "Harbor"), t1).unwrap();
    let original = first.entries[0].clone();

    let applied = store
        .upsert_at(
            draft("Ada Lovelace", "Physics", "Supernova").with_id(original.id),
            t2,
        )
        .unwrap();

    assert_eq!(applied.entries.len(), 2);
    let edited = &applied.entries[0];
    assert_eq!(edited.id, original.id);
    assert_eq!(edited.created_at, Some(t0));
    assert_eq!(edited.updated_at, Some(t2));
    assert_eq!(edited.photo_title, "Supernova");
    assert_eq!(applied.entries[1].name, "Grace Hopper");
    assert!(matches!(applied.change, Change::Updated { index: 0, .. }));
}

#[test]
fn removing_unknown_id_leaves_blob_untouched() {
    let mut store = EntryStore::new(MemoryStorage::new());
    store.upsert(draft("Ada Lovelace", "Physics", "Nebula")).unwrap();
    let before = store.storage().raw(DEFAULT_STORAGE_KEY).map(str::to_string);

    let applied = store.remove(42).unwrap();
    assert_eq!(applied.change, Change::Missing { id: 42 });
    assert_eq!(applied.entries.len(), 1);
    assert_eq!(store.storage().raw(DEFAULT_STORAGE_KEY).map(str::to_string), before);
}

#[test]
fn remove_twice_matches_remove_once() {
    let mut store = EntryStore::new(MemoryStorage::new());
    let id = store
        .upsert(draft("Ada Lovelace", "Physics", "Nebula"))
        .unwrap()
        .change
        .id();
    store.upsert(draft("Grace Hopper", "Computing", "Harbor")).unwrap();

    let once = store.remove(id).unwrap().entries;
    let twice = store.remove(id).unwrap().entries;
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
}

#[test]
fn find_reports_not_found() {
    let store = EntryStore::new(MemoryStorage::new());
    assert!(matches!(store.find(7), Err(StoreError::NotFound(7))));
}

#[test]
fn browser_written_blob_is_readable_and_rewritten_in_same_layout() {
    let raw = r#"[{"id":1735787045678,"name":"Ada","dept":"Physics","title":"Nebula","createdAt":"2025-01-02T03:04:05.678Z"}]"#;
    let mut store = EntryStore::new(MemoryStorage::seeded(DEFAULT_STORAGE_KEY, raw));

    let entries = store.load();
    assert_eq!(entries.len(), 1);
    store.save(&entries).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap()).unwrap();
    let obj = &value[0];
    assert_eq!(obj["id"], 1_735_787_045_678u64);
    assert_eq!(obj["dept"], "Physics");
    assert_eq!(obj["title"], "Nebula");
    assert!(obj.get("createdAt").is_some());
    assert!(obj.get("updatedAt").is_none());
}

#[test]
fn custom_key_is_isolated() {
    let mut store = EntryStore::with_key(MemoryStorage::new(), "otherContest");
    store.upsert(draft("Ada Lovelace", "Physics", "Nebula")).unwrap();
    let storage = store.into_storage();
    assert!(storage.raw("otherContest").is_some());
    assert!(storage.raw(DEFAULT_STORAGE_KEY).is_none());
}

#[test]
fn insert_next_to_largest_possible_id_survives_reload() {
    let raw = r#"[{"id":18446744073709551615,"name":"Ada","dept":"Physics","title":"Nebula"}]"#;
    let mut store = EntryStore::new(MemoryStorage::seeded(DEFAULT_STORAGE_KEY, raw));

    let applied = store.upsert(draft("Grace Hopper", "Computing", "Harbor")).unwrap();
    assert_eq!(applied.change.id(), 0);

    let ids: Vec<_> = store.load().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![u64::MAX, 0]);
}
