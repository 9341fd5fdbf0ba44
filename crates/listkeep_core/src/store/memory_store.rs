//! In-process key-value slot for ephemeral sessions and tests.

use crate::store::{StoreAdapter, StoreError, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Store adapter holding blobs in memory.
///
/// Can be switched offline to exercise unavailable-medium paths.
#[derive(Debug, Default)]
pub struct MemoryStoreAdapter {
    slots: RefCell<HashMap<String, String>>,
    offline: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStoreAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `blob` already stored under `key`.
    pub fn with_value(key: &str, blob: impl Into<String>) -> Self {
        let store = Self::default();
        store
            .slots
            .borrow_mut()
            .insert(key.to_string(), blob.into());
        store
    }

    /// When offline, every load/save fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Stored blob for `key`, bypassing the offline switch.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.get() {
            return Err(StoreError::Unavailable(
                "memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

impl StoreAdapter for MemoryStoreAdapter {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_online()?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> StoreResult<()> {
        self.ensure_online()?;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStoreAdapter;
    use crate::store::StoreAdapter;

    #[test]
    fn offline_store_rejects_reads_and_writes() {
        let store = MemoryStoreAdapter::with_value("k", "v");
        store.set_offline(true);

        assert!(store.load("k").unwrap_err().is_unavailable());
        assert!(store.save("k", "w").unwrap_err().is_unavailable());
        assert_eq!(store.peek("k").as_deref(), Some("v"));
        assert_eq!(store.save_count(), 0);

        store.set_offline(false);
        store.save("k", "w").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("w"));
        assert_eq!(store.save_count(), 1);
    }
}
