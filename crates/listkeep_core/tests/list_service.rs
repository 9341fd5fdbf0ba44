use listkeep_core::db::open_db_in_memory;
use listkeep_core::{
    ColorChoice, CollectionStore, InitOutcome, ListService, MemoryStoreAdapter, ReconcileError,
    ServiceError, SqliteStoreAdapter, StoreError, Task, TodoList,
};

fn seeded_memory_service(adapter: &MemoryStoreAdapter) -> ListService<&MemoryStoreAdapter> {
    let service = ListService::from_adapter(adapter);
    service.ensure_initialized().unwrap();
    service
}

#[test]
fn sqlite_backed_session_end_to_end() {
    let conn = open_db_in_memory().unwrap();
    let adapter = SqliteStoreAdapter::try_new(&conn).unwrap();
    let mut service = ListService::new(CollectionStore::new(adapter));

    assert!(matches!(
        service.ensure_initialized().unwrap(),
        InitOutcome::Seeded(_)
    ));

    let trip = service.create_list("Trip", ColorChoice::Blue).unwrap();
    let task = service.add_task(trip.id, "Pack bag").unwrap();
    let task = service.toggle_star(trip.id, task.id).unwrap();
    assert!(task.starred);

    let lists = service.fetch_collection().unwrap();
    let ids: Vec<_> = lists.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![trip.id, 2, 1], "newest list first");
    assert_eq!(lists[0].todos, vec![task]);
}

#[test]
fn add_task_updates_last_edited_and_persists() {
    let adapter = MemoryStoreAdapter::with_value(
        "TodoLists",
        r#"[{"id":1,"title":"Personal","todos":[],"lastEdited":"2025-01-04 10:34:23"}]"#,
    );
    let mut service = ListService::from_adapter(&adapter);

    let task = service.add_task(1, "Buy milk").unwrap();
    assert_eq!(
        task,
        Task {
            id: task.id,
            title: "Buy milk".to_string(),
            completed: false,
            starred: false,
        }
    );

    let list = service.get_list(1).unwrap();
    assert_eq!(list.todos, vec![task]);
    assert_ne!(list.last_edited, "2025-01-04 10:34:23");
    assert_eq!(adapter.save_count(), 1);
}

#[test]
fn blank_title_is_rejected_without_persistence_call() {
    let adapter = MemoryStoreAdapter::new();
    let mut service = seeded_memory_service(&adapter);
    let saves_before = adapter.save_count();

    for title in ["", "   "] {
        let err = service.create_list(title, ColorChoice::Red).unwrap_err();
        assert!(err.is_validation());
    }
    assert!(service.add_task(1, " ").unwrap_err().is_validation());

    assert_eq!(adapter.save_count(), saves_before);
    assert_eq!(service.fetch_collection().unwrap().len(), 2);
}

#[test]
fn missing_targets_fail_and_keep_stored_state() {
    let adapter = MemoryStoreAdapter::new();
    let mut service = seeded_memory_service(&adapter);
    let blob_before = adapter.peek("TodoLists");

    let err = service.toggle_complete(42, 1).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Reconcile(ReconcileError::ListNotFound(42))
    ));
    let err = service.delete_task(1, 999).unwrap_err();
    assert!(err.is_not_found());
    assert!(service.get_list(42).unwrap_err().is_not_found());

    assert_eq!(adapter.peek("TodoLists"), blob_before);
}

#[test]
fn offline_store_reports_unavailable_and_leaves_previous_value() {
    let adapter = MemoryStoreAdapter::new();
    let mut service = seeded_memory_service(&adapter);
    let blob_before = adapter.peek("TodoLists");

    adapter.set_offline(true);
    let err = service.create_list("Offline", ColorChoice::Green).unwrap_err();
    assert!(matches!(&err, ServiceError::Store(store) if store.is_unavailable()));

    adapter.set_offline(false);
    assert_eq!(adapter.peek("TodoLists"), blob_before);
    assert_eq!(service.fetch_collection().unwrap().len(), 2);
}

#[test]
fn rename_recolor_and_delete_list() {
    let adapter = MemoryStoreAdapter::new();
    let mut service = seeded_memory_service(&adapter);

    let renamed = service
        .update_list(2, Some("  Office "), Some(ColorChoice::Purple))
        .unwrap();
    assert_eq!(renamed.title, "Office");
    assert_eq!(renamed.color(), Some(ColorChoice::Purple));
    assert_eq!(renamed.todos.len(), 2);

    let recolored = service.update_list(2, None, Some(ColorChoice::Green)).unwrap();
    assert_eq!(recolored.title, "Office");
    assert_eq!(recolored.dark_color, "darkgreen");

    service.delete_list(1).unwrap();
    let remaining: Vec<TodoList> = service.fetch_collection().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 2);
}

#[test]
fn edit_and_delete_tasks() {
    let adapter = MemoryStoreAdapter::new();
    let mut service = seeded_memory_service(&adapter);

    let edited = service.edit_task_title(1, 2, "Buy vegetables").unwrap();
    assert_eq!(edited.title, "Buy vegetables");
    let done = service.toggle_complete(1, 2).unwrap();
    assert!(done.completed);
    let undone = service.toggle_complete(1, 2).unwrap();
    assert!(!undone.completed);

    service.delete_task(1, 1).unwrap();
    let personal = service.get_list(1).unwrap();
    assert_eq!(personal.todos.len(), 1);
    assert_eq!(personal.todos[0].title, "Buy vegetables");
}

#[test]
fn mutating_an_absent_store_starts_from_empty() {
    let adapter = MemoryStoreAdapter::new();
    let mut service = ListService::from_adapter(&adapter);

    let created = service.create_list("First", ColorChoice::Red).unwrap();
    let lists = service.fetch_collection().unwrap();
    assert_eq!(lists, vec![created]);
}

#[test]
fn search_lists_matches_case_insensitively() {
    let adapter = MemoryStoreAdapter::new();
    let mut service = seeded_memory_service(&adapter);
    service.create_list("Groceries", ColorChoice::Green).unwrap();

    let hits = service.search_lists("gRo").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Groceries");
    assert!(service.search_lists("zzz").unwrap().is_empty());

    let tasks = service.search_tasks(2, "EMAIL").unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Send emails");
}

#[test]
fn unreadable_store_is_not_masked_on_fetch() {
    let adapter = MemoryStoreAdapter::new();
    let service = ListService::from_adapter(&adapter);
    adapter.set_offline(true);

    let err = service.fetch_collection().unwrap_err();
    assert!(matches!(err, ServiceError::Store(StoreError::Unavailable(_))));
}

#[test]
fn repeated_task_ids_do_not_block_unrelated_mutations() {
    let adapter = MemoryStoreAdapter::with_value(
        "TodoLists",
        r#"[{"id":1,"title":"Personal","todos":[{"id":5,"title":"Newer"},{"id":5,"title":"Older"}]}]"#,
    );
    let mut service = ListService::from_adapter(&adapter);

    let trip = service.create_list("Trip", ColorChoice::Blue).unwrap();
    assert_eq!(adapter.save_count(), 1);

    let personal = service.get_list(1).unwrap();
    let ids: Vec<_> = personal.todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![5, 6]);
    assert_eq!(personal.todos[1].title, "Older");

    let older = service.toggle_complete(1, 6).unwrap();
    assert!(older.completed);
    assert!(!service.get_list(1).unwrap().todos[0].completed);
    assert_eq!(service.get_list(trip.id).unwrap().title, "Trip");
}

#[test]
fn mutating_a_corrupt_store_restores_default_lists() {
    let adapter = MemoryStoreAdapter::with_value("TodoLists", r#"[{"id":"#);
    let mut service = ListService::from_adapter(&adapter);

    let created = service.create_list("Fresh", ColorChoice::Purple).unwrap();
    let ids: Vec<_> = service
        .fetch_collection()
        .unwrap()
        .iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec![created.id, 2, 1]);
    assert_eq!(
        service.ensure_initialized().unwrap(),
        InitOutcome::AlreadyInitialized
    );
}

#[test]
fn exhausted_id_space_reports_a_stable_code() {
    let adapter = MemoryStoreAdapter::with_value(
        "TodoLists",
        r#"[{"id":9223372036854775807,"title":"Edge","todos":[]}]"#,
    );
    let mut service = ListService::from_adapter(&adapter);

    let err = service.create_list("Another", ColorChoice::Red).unwrap_err();
    assert_eq!(err.code(), "id_space_exhausted");
    assert_eq!(adapter.save_count(), 0);
}
