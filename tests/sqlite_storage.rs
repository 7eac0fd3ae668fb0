use tempfile::TempDir;

use entrybook::{
    core::store::EntryStore,
    entry::EntryDraft,
    persist::{KvStorage, sqlite::SqliteStorage},
    types::DEFAULT_STORAGE_KEY,
};

#[test]
fn sqlite_reopen_round_trips_entries_and_order() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("entries.db");

    let mut store = EntryStore::new(SqliteStorage::open(&db_path).expect("open sqlite"));
    let ada = store
        .upsert(EntryDraft::new("Ada Lovelace", "Physics", "Nebula"))
        .expect("insert ada");
    store
        .upsert(EntryDraft::new("Grace Hopper", "Computing", "Harbor"))
        .expect("insert grace");
    let ada_id = ada.change.id();
    store
        .upsert(EntryDraft::new("Ada Lovelace", "Physics", "Supernova").with_id(ada_id))
        .expect("edit ada");
    let expected = store.load();
    drop(store);

    let reopened = EntryStore::new(SqliteStorage::open(&db_path).expect("reopen"));
    let entries = reopened.load();
    assert_eq!(entries, expected);
    assert_eq!(entries[0].id, ada_id);
    assert_eq!(entries[0].photo_title, "Supernova");
    assert_eq!(entries[1].name, "Grace Hopper");
}

#[test]
fn overwrite_replaces_single_row() {
    let mut storage = SqliteStorage::open_in_memory().expect("open");
    storage.set("a", "[]").expect("set");
    storage.set("a", "[1]").expect("overwrite");
    storage.set("b", "x").expect("set b");

    assert_eq!(storage.get("a").expect("get").as_deref(), Some("[1]"));
    assert_eq!(storage.keys().expect("keys"), vec!["a".to_string(), "b".to_string()]);

    storage.remove("a").expect("remove");
    assert_eq!(storage.get("a").expect("get"), None);
}

#[test]
fn corrupt_row_reads_as_empty_collection() {
    let mut storage = SqliteStorage::open_in_memory().expect("open");
    storage
        .set(DEFAULT_STORAGE_KEY, "[{\"id\": \"oops\"}]")
        .expect("seed");
    let mut store = EntryStore::new(storage);
    assert!(store.load().is_empty());

    // The next write replaces the corrupt blob.
    store
        .upsert(EntryDraft::new("Ada Lovelace", "Physics", "Nebula"))
        .expect("insert");
    assert_eq!(store.len(), 1);
}
