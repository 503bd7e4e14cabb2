//! # Asset Ledger Core
//!
//! Pure primitives for the Asset Ledger: the asset record, canonical JSON
//! encoding, and state digests.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over records that every validating replica must encode identically.
//!
//! ## Key Types
//!
//! - [`Asset`] - The record stored under each asset key
//! - [`StateDigest`] - Blake3 hash of a record's canonical bytes
//! - [`EstimatedValue`] - Non-negative numeric value of an asset
//! - [`AssetDocument`] - A stored record opened for read-modify-write
//! - [`CoreError`] - Encoding, decoding and argument errors
//!
//! ## Canonicalization
//!
//! All records are written as canonical JSON. See the [`canonical`] module.

pub mod asset;
pub mod canonical;
pub mod error;
pub mod types;
pub mod validation;

pub use asset::{field, Asset, AssetDocument, ASSET_DOC_TYPE};
pub use canonical::{canonical_json, decode, to_canonical_bytes, MAX_DEPTH};
pub use error::{CoreError, EncodingError, Result};
pub use types::{EstimatedValue, StateDigest};
pub use validation::{parse_estimated_value, validate_asset_id};
