//! Error types for the Asset Ledger Core.

use thiserror::Error;

/// Errors raised while producing canonical bytes.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("nesting exceeds maximum depth of {0}")]
    TooDeep(usize),
}

/// Core errors that can occur while encoding, decoding or parsing records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
