//! Core domain logic for listkeep.
//! This crate owns list/task invariants, persistence and reconciliation.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod search;
pub mod service;
pub mod store;
pub mod theme;
pub mod view;

pub use config::{default_log_level, LogConfig, StoreConfig};
pub use logging::{init_logging, logging_status};
pub use model::palette::ColorChoice;
pub use model::todo_list::{
    normalize_title, Collection, ListId, Task, TaskId, TitleError, TodoList, MAX_TITLE_CHARS,
};
pub use reconcile::context::{EditContext, IdGenerator};
pub use reconcile::{apply, Applied, Mutation, ReconcileError, ReconcileResult};
pub use search::filter::{filter_lists, filter_tasks, TitleQuery};
pub use service::init::{default_collection, ensure_initialized, InitOutcome, SeedReason};
pub use service::list_service::{ListService, ServiceError, ServiceResult};
pub use store::collection_store::CollectionStore;
pub use store::memory_store::MemoryStoreAdapter;
pub use store::sqlite_store::SqliteStoreAdapter;
pub use store::{StoreAdapter, StoreError, StoreResult, DEFAULT_STORAGE_KEY};
pub use theme::{Theme, ThemeMode};
pub use view::{lists_for_display, partition_tasks, TaskCounts};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
