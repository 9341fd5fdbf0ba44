//! First-run initialization guard.
//!
//! # Invariants
//! - Seeds only when the stored collection is absent or unreadable.
//! - A well-formed stored collection is never overwritten, even when empty.

use crate::model::palette::ColorChoice;
use crate::model::todo_list::{Collection, Task, TodoList};
use crate::store::collection_store::CollectionStore;
use crate::store::{StoreAdapter, StoreError, StoreResult};
use log::{info, warn};

const SEED_LAST_EDITED: &str = "2025-01-04 10:34:23";

/// Why the guard wrote the default collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    Absent,
    Corrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Seeded(SeedReason),
    AlreadyInitialized,
}

/// Sample lists written on first start.
pub fn default_collection() -> Collection {
    let mut personal = TodoList::new(1, "Personal", ColorChoice::Red, SEED_LAST_EDITED);
    personal.todos = vec![
        Task {
            completed: true,
            ..Task::new(1, "Finish book")
        },
        Task::new(2, "Buy groceries"),
    ];

    let mut work = TodoList::new(2, "Work", ColorChoice::Red, SEED_LAST_EDITED);
    work.todos = vec![
        Task::new(1, "Create Presentation"),
        Task::new(2, "Send emails"),
    ];

    Collection::from(vec![personal, work])
}

/// Ensures a readable collection exists, writing [`default_collection`]
/// otherwise.
///
/// # Errors
/// - Medium failures on read or write are returned unchanged; nothing is
///   written when the read fails.
pub fn ensure_initialized<S: StoreAdapter>(
    store: &CollectionStore<S>,
) -> StoreResult<InitOutcome> {
    let reason = match store.load() {
        Ok(collection) => {
            info!(
                "event=store_init module=service status=ok action=none lists={}",
                collection.len()
            );
            return Ok(InitOutcome::AlreadyInitialized);
        }
        Err(StoreError::NotFound(_)) => SeedReason::Absent,
        Err(StoreError::CorruptState { message, .. }) => {
            warn!(
                "event=store_init module=service status=warn reason=corrupt_state error={}",
                message
            );
            SeedReason::Corrupt
        }
        Err(err) => return Err(err),
    };

    store.save(&default_collection())?;
    info!(
        "event=store_init module=service status=ok action=seeded reason={:?}",
        reason
    );
    Ok(InitOutcome::Seeded(reason))
}
