//! SQLite-backed durable storage.
//!
//! Two tables:
//! - `kv` holds the working-session snapshot (one JSON value per key)
//! - `sessions` is a local archive of successfully finalized sessions

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StorageError;

/// One finalized session as archived locally after a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedSession {
    pub id: i64,
    pub task_id: String,
    pub focus_ms: u64,
    pub records: u64,
    pub started_at: DateTime<Utc>,
    pub finalized_at: DateTime<Utc>,
}

/// SQLite database at `~/.config/flowdoro/flowdoro.db`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database, creating file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?.join("flowdoro.db"))
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                task_id      TEXT NOT NULL,
                focus_ms     INTEGER NOT NULL,
                records      INTEGER NOT NULL,
                started_at   TEXT NOT NULL,
                finalized_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_finalized_at
                ON sessions(finalized_at);",
        )?;
        Ok(())
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
    }

    /// Last write for a key always wins.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Archive a finalized session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn archive_session(
        &self,
        task_id: &str,
        focus_ms: u64,
        records: u64,
        started_at: DateTime<Utc>,
        finalized_at: DateTime<Utc>,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO sessions (task_id, focus_ms, records, started_at, finalized_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                task_id,
                focus_ms,
                records,
                started_at.to_rfc3339(),
                finalized_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Archived sessions, most recent first.
    pub fn list_archived(&self, limit: u32) -> Result<Vec<ArchivedSession>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_id, focus_ms, records, started_at, finalized_at
             FROM sessions ORDER BY finalized_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            let started_at: String = row.get(4)?;
            let finalized_at: String = row.get(5)?;
            Ok(ArchivedSession {
                id: row.get(0)?,
                task_id: row.get(1)?,
                focus_ms: row.get(2)?,
                records: row.get(3)?,
                started_at: parse_rfc3339(&started_at),
                finalized_at: parse_rfc3339(&finalized_at),
            })
        })?;
        rows.collect()
    }
}

fn parse_rfc3339(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
