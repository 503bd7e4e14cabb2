//! SQLite implementation of the WorldState trait.
//!
//! A persistent backend for running the registry outside a ledger host. It
//! uses rusqlite with bundled SQLite, wrapped in async via
//! tokio::spawn_blocking.

use std::ops::Bound;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{check_key, KeyRange, StateEntry, WorldState};

/// SQLite-based world state.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteWorldState {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteWorldState {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        tracing::debug!(path = %path.display(), "opened world state");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation on the connection.
    async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

/// Build the range query and its positional arguments.
fn range_query(range: &KeyRange, limit: usize) -> (String, Vec<SqlValue>) {
    let mut sql = String::from("SELECT key, value FROM world_state WHERE 1 = 1");
    let mut args = Vec::with_capacity(3);

    match &range.start {
        Bound::Included(s) => {
            sql.push_str(" AND key >= ?");
            args.push(SqlValue::Text(s.clone()));
        }
        Bound::Excluded(s) => {
            sql.push_str(" AND key > ?");
            args.push(SqlValue::Text(s.clone()));
        }
        Bound::Unbounded => {}
    }

    match &range.end {
        Bound::Included(e) => {
            sql.push_str(" AND key <= ?");
            args.push(SqlValue::Text(e.clone()));
        }
        Bound::Excluded(e) => {
            sql.push_str(" AND key < ?");
            args.push(SqlValue::Text(e.clone()));
        }
        Bound::Unbounded => {}
    }

    sql.push_str(" ORDER BY key LIMIT ?");
    args.push(SqlValue::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));

    (sql, args)
}

#[async_trait]
impl WorldState for SqliteWorldState {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        let key = key.to_string();

        self.run(move |conn| {
            let value: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT value FROM world_state WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value.map(Bytes::from))
        })
        .await
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        check_key(key)?;
        let key = key.to_string();

        self.run(move |conn| {
            conn.execute(
                "INSERT INTO world_state (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, &value[..], now_millis()],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_state(&self, key: &str) -> Result<()> {
        let key = key.to_string();

        self.run(move |conn| {
            conn.execute("DELETE FROM world_state WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
    }

    async fn get_state_by_range(&self, range: &KeyRange, limit: usize) -> Result<Vec<StateEntry>> {
        if range.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let (sql, args) = range_query(range, limit);

        self.run(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let entries = stmt
                .query_map(params_from_iter(args.iter()), |row| {
                    let key: String = row.get(0)?;
                    let value: Vec<u8> = row.get(1)?;
                    Ok(StateEntry {
                        key,
                        value: Bytes::from(value),
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
    }
}

/// Current time in milliseconds since the Unix epoch.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
