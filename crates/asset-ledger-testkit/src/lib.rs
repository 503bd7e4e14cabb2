//! # Asset Ledger Testkit
//!
//! Testing utilities for the Asset Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known records with their expected canonical text
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up registry scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical encoding so every implementation writes
//! the same bytes:
//!
//! ```rust
//! use asset_ledger_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, _text) in verify_all_vectors() {
//!     assert!(matches, "{} diverged", name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use asset_ledger_testkit::generators::{asset_and_shuffled_json};
//!
//! proptest! {
//!     #[test]
//!     fn field_order_is_irrelevant((asset, shuffled) in asset_and_shuffled_json()) {
//!         let a = asset.to_canonical_bytes().unwrap();
//!         let b = asset_ledger_core::canonical_json(&shuffled).unwrap();
//!         prop_assert_eq!(a, b);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use asset_ledger_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let asset = fixture.make_asset("carro9", 4200);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{init_tracing, TestFixture};
pub use generators::{asset, asset_and_shuffled_json, AssetParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
