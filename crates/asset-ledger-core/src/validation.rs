//! Argument validation: weakly-typed invocation arguments into strong types.

use crate::error::{CoreError, Result};
use crate::types::EstimatedValue;

/// Validate a world-state key used as an asset ID.
///
/// Keys must be non-empty. Keys beginning with U+0000 are reserved by ledger
/// hosts for composite keys and never name a plain asset.
pub fn validate_asset_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CoreError::InvalidArgument("asset id must not be empty".into()));
    }
    if id.starts_with('\u{0}') {
        return Err(CoreError::InvalidArgument(format!(
            "asset id {:?} starts with the reserved composite-key prefix",
            id
        )));
    }
    Ok(())
}

/// Parse an estimated value argument.
///
/// Accepts a non-negative decimal number (`5000`, `4999.50`), surrounding
/// whitespace ignored. Signs, exponents and bare points are rejected.
pub fn parse_estimated_value(raw: &str) -> Result<EstimatedValue> {
    let trimmed = raw.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (trimmed, None),
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !fraction.map_or(true, digits) {
        return Err(CoreError::InvalidArgument(format!(
            "estimated value {:?} is not a non-negative number",
            raw
        )));
    }

    match fraction {
        None => trimmed.parse::<u64>().map(EstimatedValue::from_u64).map_err(|e| {
            CoreError::InvalidArgument(format!("estimated value {:?} is out of range: {}", raw, e))
        }),
        Some(_) => {
            let value = trimmed.parse::<f64>().map_err(|e| {
                CoreError::InvalidArgument(format!("estimated value {:?}: {}", raw, e))
            })?;
            EstimatedValue::from_f64(value)
        }
    }
}
