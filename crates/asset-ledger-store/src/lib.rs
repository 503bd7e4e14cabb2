//! # Asset Ledger Store
//!
//! World-state abstraction for the Asset Ledger. Provides a trait-based
//! interface over the host's key/value state with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! Registry operations never touch a database directly. They call the four
//! primitives of the [`WorldState`] trait (get, put, delete, range scan),
//! so the same operation code runs against whatever state the host platform
//! supplies. [`SqliteWorldState`] is a persistent backend, [`MemoryWorldState`]
//! is for tests and embedding.
//!
//! ## Key Types
//!
//! - [`WorldState`] - The async trait for all state access
//! - [`KeyRange`] - Range-scan bounds with ledger-host semantics
//! - [`StateEntry`] - A `(key, value)` pair returned by range scans
//! - [`SqliteWorldState`] - SQLite-based persistent state
//! - [`MemoryWorldState`] - In-memory state for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use asset_ledger_store::{KeyRange, SqliteWorldState, WorldState};
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let state = SqliteWorldState::open("world_state.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let state = SqliteWorldState::open_memory().unwrap();
//!
//!     state.put_state("carro1", b"{}".to_vec().into()).await.unwrap();
//!     let page = state.get_state_by_range(&KeyRange::all(), 100).await.unwrap();
//!     assert_eq!(page.len(), 1);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Byte ordering**: Both backends order keys by their UTF-8 bytes
//! - **Paged scans**: Range scans take a limit; callers resume with [`KeyRange::after`]
//! - **No history**: Deletes remove the key; there is no tombstone

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryWorldState;
pub use sqlite::SqliteWorldState;
pub use traits::{KeyRange, StateEntry, WorldState};
