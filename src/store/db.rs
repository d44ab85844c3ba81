//! SQLite-backed progress store
//!
//! Keeps all progress records in a single `progress_records` table. A
//! `schema_version` table records the layout version for later migrations.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::{ProgressStore, RecordKey, StoreError};

/// Schema version stamped on new databases; bump alongside a migration
const SCHEMA_VERSION: i32 = 1;

/// Progress store on a SQLite database file
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the progress database at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Create tables and stamp the schema version on a fresh database
    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Current schema version
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| {
            r.get(0)
        })?)
    }
}

impl ProgressStore for SqliteStore {
    fn read(&self, key: RecordKey) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM progress_records WHERE key = ?1",
                [key.as_str()],
                |r| r.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: RecordKey, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO progress_records (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
            "#,
            rusqlite::params![key.as_str(), value, now],
        )?;
        Ok(())
    }

    fn remove(&self, key: RecordKey) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM progress_records WHERE key = ?1", [key.as_str()])?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS progress_records (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT 0
);
"#;
