//! WorldState trait: the abstract interface to the host's key/value state.
//!
//! This trait keeps registry operations storage-agnostic. Implementations
//! include SQLite and in-memory.

use std::ops::Bound;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Result, StoreError};

/// A `(key, value)` pair returned by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub key: String,
    pub value: Bytes,
}

/// Bounds of a range scan over the keyspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: Bound<String>,
    pub end: Bound<String>,
}

impl KeyRange {
    /// Range with ledger-host semantics.
    ///
    /// `start` is inclusive, `end` is exclusive, and an empty string leaves
    /// that side unbounded. `KeyRange::new("", "")` covers every key.
    pub fn new(start: &str, end: &str) -> Self {
        let start = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_string())
        };
        let end = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };
        Self { start, end }
    }

    /// The whole keyspace.
    pub fn all() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }

    /// The remainder of this range strictly after `key`.
    pub fn after(&self, key: &str) -> Self {
        Self {
            start: Bound::Excluded(key.to_string()),
            end: self.end.clone(),
        }
    }

    /// Borrowed bounds, usable with `BTreeMap::range`.
    pub fn as_bounds(&self) -> (Bound<&str>, Bound<&str>) {
        (borrow_bound(&self.start), borrow_bound(&self.end))
    }

    /// Whether no key can fall inside the range.
    pub fn is_empty(&self) -> bool {
        match (&self.start, &self.end) {
            (Bound::Included(s), Bound::Included(e)) => s > e,
            (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e)) => {
                s >= e
            }
            _ => false,
        }
    }
}

impl Default for KeyRange {
    fn default() -> Self {
        Self::all()
    }
}

fn borrow_bound(bound: &Bound<String>) -> Bound<&str> {
    match bound {
        Bound::Included(s) => Bound::Included(s.as_str()),
        Bound::Excluded(s) => Bound::Excluded(s.as_str()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

/// Reject keys no ledger host accepts.
pub(crate) fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}

/// The WorldState trait: async interface to key/value ledger state.
///
/// All methods are async so the host can serve them over a channel.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the runtime.
///
/// # Design Notes
///
/// - **Last write wins**: `put_state` overwrites any existing value.
/// - **Absent vs empty**: `get_state` returns `None` for absent keys; an
///   empty value is returned as-is and interpreted by the caller.
/// - **Ordering**: Range scans return entries in ascending byte order of key.
#[async_trait]
pub trait WorldState: Send + Sync {
    /// Get the value stored at `key`.
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store `value` at `key`, replacing any previous value.
    async fn put_state(&self, key: &str, value: Bytes) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete_state(&self, key: &str) -> Result<()>;

    /// Get up to `limit` entries inside `range`, ordered by key.
    ///
    /// A result shorter than `limit` means the range is exhausted.
    async fn get_state_by_range(&self, range: &KeyRange, limit: usize) -> Result<Vec<StateEntry>>;
}
