//! Typed collection access on top of a raw [`StoreAdapter`].
//!
//! # Responsibility
//! - Serialize the whole collection into one blob on save.
//! - Classify missing and unreadable blobs on load.
//!
//! # Invariants
//! - `save` never writes a collection with duplicate list or task ids.
//! - `load` never masks medium failures as an empty collection.
//! - `load` re-keys repeated ids, so a loaded collection can always be saved.

use crate::model::todo_list::Collection;
use crate::store::{StoreAdapter, StoreError, StoreResult, DEFAULT_STORAGE_KEY};
use log::{info, warn};

/// Blob values that older clients wrote instead of leaving the slot empty.
const ABSENT_MARKERS: [&str; 2] = ["undefined", "null"];

/// Collection persistence over one storage key.
pub struct CollectionStore<S: StoreAdapter> {
    adapter: S,
    key: String,
}

impl<S: StoreAdapter> CollectionStore<S> {
    /// Uses [`DEFAULT_STORAGE_KEY`].
    pub fn new(adapter: S) -> Self {
        Self::with_key(adapter, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(adapter: S, key: impl Into<String>) -> Self {
        Self {
            adapter,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn adapter(&self) -> &S {
        &self.adapter
    }

    /// Reads and parses the stored collection.
    ///
    /// Repeated list ids, or repeated task ids within one list, are given
    /// fresh ids; the first occurrence keeps its id.
    ///
    /// # Errors
    /// - `NotFound` when nothing (or an absent marker) is stored.
    /// - `CorruptState` when the blob cannot be parsed.
    /// - `Db`/`Unavailable` when the medium fails.
    pub fn load(&self) -> StoreResult<Collection> {
        let Some(blob) = self.adapter.load(&self.key)? else {
            return Err(StoreError::NotFound(self.key.clone()));
        };
        if ABSENT_MARKERS.contains(&blob.trim()) {
            return Err(StoreError::NotFound(self.key.clone()));
        }

        let mut collection: Collection =
            serde_json::from_str(&blob).map_err(|err| StoreError::CorruptState {
                key: self.key.clone(),
                message: err.to_string(),
            })?;
        if let Err(message) = collection.check_ids() {
            let changed = collection.repair_ids();
            warn!(
                "event=collection_load module=store status=warn reason=duplicate_ids action=rekeyed ids_changed={} detail={}",
                changed, message
            );
        }
        Ok(collection)
    }

    /// Like [`Self::load`], but treats missing and corrupt state as empty.
    pub fn load_or_empty(&self) -> StoreResult<Collection> {
        match self.load() {
            Ok(collection) => Ok(collection),
            Err(StoreError::NotFound(_)) => Ok(Collection::new()),
            Err(StoreError::CorruptState { message, .. }) => {
                warn!(
                    "event=collection_load module=store status=warn reason=corrupt_state fallback=empty error={}",
                    message
                );
                Ok(Collection::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Replaces the stored collection.
    pub fn save(&self, collection: &Collection) -> StoreResult<()> {
        collection
            .check_ids()
            .map_err(StoreError::InvalidCollection)?;
        let blob = serde_json::to_string(collection).map_err(StoreError::Serialize)?;
        self.adapter.save(&self.key, &blob)?;
        info!(
            "event=collection_save module=store status=ok lists={} tasks={}",
            collection.len(),
            collection
                .lists()
                .iter()
                .map(|list| list.todos.len())
                .sum::<usize>()
        );
        Ok(())
    }
}
