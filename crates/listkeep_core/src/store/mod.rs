//! Persistent store adapter for the serialized list collection.
//!
//! # Responsibility
//! - Define the raw get/set contract over one named slot per key.
//! - Provide SQLite-backed and in-memory slot implementations.
//! - (De)serialize the collection aggregate on top of the raw slot.
//!
//! # Invariants
//! - A save replaces the whole stored value; partial writes are never
//!   observable.
//! - Adapters never retry; failures are returned to the caller.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collection_store;
pub mod memory_store;
pub mod sqlite_store;

/// Storage key holding the serialized collection.
pub const DEFAULT_STORAGE_KEY: &str = "TodoLists";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error from store adapter and collection (de)serialization calls.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite medium failed or is not bootstrapped.
    Db(DbError),
    /// Non-SQLite medium is inaccessible.
    Unavailable(String),
    /// No value stored under the key.
    NotFound(String),
    /// Stored value cannot be deserialized.
    CorruptState { key: String, message: String },
    /// Collection could not be serialized.
    Serialize(serde_json::Error),
    /// Collection violates id uniqueness and was not written.
    InvalidCollection(String),
}

impl StoreError {
    /// Whether the underlying medium itself failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Db(_) | Self::Unavailable(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "store unavailable: {err}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
            Self::NotFound(key) => write!(f, "no stored value for key `{key}`"),
            Self::CorruptState { key, message } => {
                write!(f, "stored value for key `{key}` is corrupt: {message}")
            }
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
            Self::InvalidCollection(message) => write!(f, "invalid collection: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw key-value persistence boundary.
///
/// Values are opaque serialized blobs; callers own the format.
pub trait StoreAdapter {
    /// Returns the stored blob, or `None` when the key was never written.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the stored blob for `key`.
    fn save(&self, key: &str, blob: &str) -> StoreResult<()>;
}

impl<T: StoreAdapter + ?Sized> StoreAdapter for &T {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, blob: &str) -> StoreResult<()> {
        (**self).save(key, blob)
    }
}
