use listkeep_core::db::open_db_in_memory;
use listkeep_core::{
    default_collection, ensure_initialized, Collection, CollectionStore, InitOutcome,
    MemoryStoreAdapter, SeedReason, SqliteStoreAdapter,
};

#[test]
fn empty_store_is_seeded_with_default_lists() {
    let conn = open_db_in_memory().unwrap();
    let store = CollectionStore::new(SqliteStoreAdapter::try_new(&conn).unwrap());

    let outcome = ensure_initialized(&store).unwrap();
    assert_eq!(outcome, InitOutcome::Seeded(SeedReason::Absent));

    let collection = store.load().unwrap();
    assert_eq!(collection, default_collection());
    assert_eq!(collection.len(), 2);

    let personal = collection.find(1).unwrap();
    assert_eq!(personal.title, "Personal");
    let titles: Vec<_> = personal.todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Finish book", "Buy groceries"]);
    assert!(personal.todos[0].completed);

    let work = collection.find(2).unwrap();
    assert_eq!(work.title, "Work");
    let titles: Vec<_> = work.todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Create Presentation", "Send emails"]);
    assert!(work.todos.iter().all(|t| !t.completed && !t.starred));
}

#[test]
fn second_call_never_overwrites() {
    let store = CollectionStore::new(MemoryStoreAdapter::new());

    ensure_initialized(&store).unwrap();
    assert_eq!(
        ensure_initialized(&store).unwrap(),
        InitOutcome::AlreadyInitialized
    );
    assert_eq!(store.adapter().save_count(), 1);
}

#[test]
fn existing_empty_collection_is_kept() {
    let store = CollectionStore::new(MemoryStoreAdapter::with_value("TodoLists", "[]"));

    assert_eq!(
        ensure_initialized(&store).unwrap(),
        InitOutcome::AlreadyInitialized
    );
    assert_eq!(store.load().unwrap(), Collection::new());
    assert_eq!(store.adapter().save_count(), 0);
}

#[test]
fn corrupt_state_is_reseeded() {
    let store = CollectionStore::new(MemoryStoreAdapter::with_value("TodoLists", "[{\"id\":"));

    assert_eq!(
        ensure_initialized(&store).unwrap(),
        InitOutcome::Seeded(SeedReason::Corrupt)
    );
    assert_eq!(store.load().unwrap(), default_collection());
}

#[test]
fn undefined_marker_counts_as_absent() {
    let store = CollectionStore::new(MemoryStoreAdapter::with_value("TodoLists", "undefined"));
    assert_eq!(
        ensure_initialized(&store).unwrap(),
        InitOutcome::Seeded(SeedReason::Absent)
    );
}

#[test]
fn unavailable_store_is_reported_without_writing() {
    let store = CollectionStore::new(MemoryStoreAdapter::new());
    store.adapter().set_offline(true);

    let err = ensure_initialized(&store).unwrap_err();
    assert!(err.is_unavailable());

    store.adapter().set_offline(false);
    assert_eq!(store.adapter().peek("TodoLists"), None);
}
