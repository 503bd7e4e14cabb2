//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during world-state access.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A lock guarding the state was poisoned by a panicking holder.
    #[error("state lock poisoned: {0}")]
    LockPoisoned(String),

    /// A blocking task failed to complete.
    #[error("blocking task failed: {0}")]
    Task(String),

    /// Key rejected by the state.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
