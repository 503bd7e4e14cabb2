//! Error types for the registry.

use asset_ledger_core::{CoreError, EncodingError, EstimatedValue};
use asset_ledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// Every error aborts the invocation before any write is performed.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Create against an occupied key.
    #[error("the asset {0} already exists")]
    AlreadyExists(String),

    /// Read, update, delete or transfer against an absent or empty key.
    #[error("the asset {0} does not exist")]
    NotFound(String),

    /// Update tried to raise the estimated value.
    #[error(
        "the new estimated value of {id} is higher than the previous estimated value \
         ({proposed} > {current})"
    )]
    ValueIncrease {
        id: String,
        current: EstimatedValue,
        proposed: EstimatedValue,
    },

    /// A record could not be canonically encoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// A stored record could not be decoded.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// Malformed invocation argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invocation named a function the registry does not export.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// World-state error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<CoreError> for RegistryError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Encoding(err) => RegistryError::Encoding(err),
            CoreError::Decoding(msg) => RegistryError::Decoding(msg),
            CoreError::InvalidArgument(msg) => RegistryError::InvalidArgument(msg),
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
