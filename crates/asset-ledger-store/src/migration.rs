//! Schema setup for the SQLite world state.
//!
//! The schema version lives in SQLite's `user_version` header field, so a
//! database file carries its own version without a bookkeeping table.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// The world-state table.
///
/// TEXT keys compare with the BINARY collation, i.e. by UTF-8 bytes,
/// which matches the ordering of the in-memory state.
const WORLD_STATE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS world_state (
        key TEXT PRIMARY KEY NOT NULL,   -- world-state key (asset ID)
        value BLOB NOT NULL,             -- canonical record bytes
        updated_at INTEGER NOT NULL      -- local time of last write (Unix ms)
    );
"#;

/// Bring the database up to [`CURRENT_VERSION`].
///
/// Safe to call on every open. A file written by a newer build is refused
/// rather than read with a schema this build does not know.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if found > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema version {} is newer than supported version {}",
            found, CURRENT_VERSION
        )));
    }
    if found == CURRENT_VERSION {
        return Ok(());
    }

    // Schema and version bump commit together
    let tx = conn.transaction()?;
    tx.execute_batch(WORLD_STATE_SCHEMA)?;
    tx.pragma_update(None, "user_version", CURRENT_VERSION)?;
    tx.commit()?;

    tracing::info!(from = found, to = CURRENT_VERSION, "migrated world state schema");
    Ok(())
}
