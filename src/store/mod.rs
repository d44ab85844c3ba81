//! Durable key-value storage for progress records
//!
//! The tracker persists four independently keyed records, each as JSON text.
//! Backends only move text; encoding and the fall-back-to-default policy live
//! in the tracker so a corrupt record never affects the others.

mod db;

pub use db::SqliteStore;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Key of a durable progress record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Progression,
    UserStats,
    Achievements,
    DailyChallenges,
}

impl RecordKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Progression => "progression",
            Self::UserStats => "user_stats",
            Self::Achievements => "achievements",
            Self::DailyChallenges => "daily_challenges",
        }
    }

    pub fn all() -> &'static [RecordKey] {
        &[
            Self::Progression,
            Self::UserStats,
            Self::Achievements,
            Self::DailyChallenges,
        ]
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by storage backends
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare store location: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Text key-value store the tracker writes through to
pub trait ProgressStore: Send + Sync {
    /// Read a record, `None` if it was never written
    fn read(&self, key: RecordKey) -> Result<Option<String>, StoreError>;

    /// Replace a record
    fn write(&self, key: RecordKey, value: &str) -> Result<(), StoreError>;

    /// Delete a record
    fn remove(&self, key: RecordKey) -> Result<(), StoreError>;
}

/// In-process store for tests and throwaway sessions.
///
/// Clones share the same records, so a test can keep one handle while the
/// tracker owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<RecordKey, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<MutexGuard<'_, HashMap<RecordKey, String>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Raw record text, bypassing the trait (for inspection)
    pub fn get(&self, key: RecordKey) -> Option<String> {
        self.records().ok()?.get(&key).cloned()
    }
}

impl ProgressStore for MemoryStore {
    fn read(&self, key: RecordKey) -> Result<Option<String>, StoreError> {
        Ok(self.records()?.get(&key).cloned())
    }

    fn write(&self, key: RecordKey, value: &str) -> Result<(), StoreError> {
        self.records()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: RecordKey) -> Result<(), StoreError> {
        self.records()?.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.read(RecordKey::UserStats).unwrap().is_none());

        store.write(RecordKey::UserStats, "{}").unwrap();
        assert_eq!(store.read(RecordKey::UserStats).unwrap().as_deref(), Some("{}"));
        assert!(store.read(RecordKey::Progression).unwrap().is_none());

        store.remove(RecordKey::UserStats).unwrap();
        assert!(store.get(RecordKey::UserStats).is_none());
    }

    #[test]
    fn test_memory_store_clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.write(RecordKey::Achievements, "[2]").unwrap();
        assert_eq!(handle.get(RecordKey::Achievements).as_deref(), Some("[2]"));
    }

    #[test]
    fn test_record_keys_are_distinct() {
        let mut names: Vec<_> = RecordKey::all().iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
