//! In-memory implementation of the WorldState trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Result, StoreError};
use crate::traits::{check_key, KeyRange, StateEntry, WorldState};

/// In-memory world state.
///
/// All data is lost when the state is dropped. Thread-safe via RwLock.
pub struct MemoryWorldState {
    entries: RwLock<BTreeMap<String, Bytes>>,
}

impl MemoryWorldState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Whether the state holds no keys.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Bytes>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Bytes>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for MemoryWorldState {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorldState for MemoryWorldState {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        check_key(key)?;
        self.write()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<()> {
        self.write()?.remove(key);
        Ok(())
    }

    async fn get_state_by_range(&self, range: &KeyRange, limit: usize) -> Result<Vec<StateEntry>> {
        // BTreeMap::range panics on inverted bounds
        if range.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let entries = self.read()?;
        Ok(entries
            .range::<str, _>(range.as_bounds())
            .take(limit)
            .map(|(key, value)| StateEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect())
    }
}
