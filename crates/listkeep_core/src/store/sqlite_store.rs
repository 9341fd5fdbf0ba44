//! SQLite-backed key-value slot.
//!
//! # Invariants
//! - One row per key in `kv_store`; saves are single-statement upserts.
//! - Construction rejects connections that skipped migrations.

use crate::db::ensure_connection_ready;
use crate::store::{StoreAdapter, StoreResult};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Instant;

/// Store adapter writing blobs into the `kv_store` table.
pub struct SqliteStoreAdapter<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStoreAdapter<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StoreAdapter for SqliteStoreAdapter<'_> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let started_at = Instant::now();
        let result = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional();

        match result {
            Ok(value) => {
                debug!(
                    "event=store_load module=store status=ok backend=sqlite found={} bytes={} duration_ms={}",
                    value.is_some(),
                    value.as_ref().map_or(0, String::len),
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error backend=sqlite duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn save(&self, key: &str, blob: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, blob],
        );

        match result {
            Ok(_) => {
                debug!(
                    "event=store_save module=store status=ok backend=sqlite bytes={} duration_ms={}",
                    blob.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error backend=sqlite duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStoreAdapter;
    use crate::db::{open_db_in_memory, DbError};
    use crate::store::{StoreAdapter, StoreError};
    use rusqlite::Connection;

    #[test]
    fn missing_key_loads_as_none() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteStoreAdapter::try_new(&conn).unwrap();
        assert_eq!(store.load("TodoLists").unwrap(), None);
    }

    #[test]
    fn save_replaces_previous_value() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteStoreAdapter::try_new(&conn).unwrap();

        store.save("TodoLists", "[1]").unwrap();
        store.save("TodoLists", "[2]").unwrap();

        assert_eq!(store.load("TodoLists").unwrap().as_deref(), Some("[2]"));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn unmigrated_connection_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteStoreAdapter::try_new(&conn).err().unwrap();
        assert!(matches!(
            err,
            StoreError::Db(DbError::UninitializedConnection {
                actual_version: 0,
                ..
            })
        ));
        assert!(err.is_unavailable());
    }
}
