//! # Asset Ledger
//!
//! Asset registry logic for a permissioned ledger: create, read, update,
//! delete, transfer, list and bootstrap operations over world state, with
//! every record written in canonical form.
//!
//! ## Overview
//!
//! Every validating node executes the same invocations independently and
//! commits hashes of the state it wrote. The registry guarantees that:
//!
//! - **Records are canonical**: the same asset yields the same bytes on every node
//! - **Operations are stateless**: world state is an argument, nothing is cached
//! - **Failures write nothing**: validation happens before the single write
//! - **Listings degrade**: a corrupt value is listed as raw text, not fatal
//!
//! ## Usage
//!
//! ```rust,no_run
//! use asset_ledger::{Asset, AssetRegistry, RegistryConfig};
//! use asset_ledger::store::MemoryWorldState;
//!
//! async fn example() {
//!     let registry = AssetRegistry::new(RegistryConfig::default());
//!     let state = MemoryWorldState::new();
//!
//!     // Seed the six fixed assets
//!     registry.init_ledger(&state).await.unwrap();
//!
//!     // Issue and move an asset
//!     let asset = Asset::new("carro7", "XYZ123", "2024", "Kia", "Blue", "Ana", 12000);
//!     registry.create_asset(&state, asset).await.unwrap();
//!     let previous = registry.transfer_asset(&state, "carro7", "Luis").await.unwrap();
//!     assert_eq!(previous, "Ana");
//!
//!     // Everything, in key order
//!     let all = registry.get_all_assets(&state).await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `asset_ledger::core` - Asset record, canonical encoding, digests
//! - `asset_ledger::store` - World-state trait and backends

pub mod cursor;
pub mod error;
pub mod invocation;
pub mod registry;
pub mod seed;

// Re-export component crates
pub use asset_ledger_core as core;
pub use asset_ledger_store as store;

// Re-export main types for convenience
pub use cursor::{AssetCursor, ListEntry};
pub use error::{RegistryError, Result};
pub use invocation::{Function, Invocation};
pub use registry::{AssetRegistry, RegistryConfig};
pub use seed::{seed_assets, SEED_IDS};

// Re-export commonly used core types
pub use asset_ledger_core::{Asset, EstimatedValue, StateDigest, ASSET_DOC_TYPE};
pub use asset_ledger_store::{KeyRange, WorldState};
