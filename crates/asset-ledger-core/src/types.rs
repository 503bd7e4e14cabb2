//! Strong type definitions for the Asset Ledger.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{CoreError, Result};
use crate::validation::parse_estimated_value;

/// A 32-byte state digest, computed as Blake3(canonical bytes of a record).
///
/// Replicas that executed the same invocation must agree on this value for
/// every key they wrote.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateDigest(pub [u8; 32]);

impl StateDigest {
    /// Digest the given canonical bytes.
    pub fn of(canonical: &[u8]) -> Self {
        Self(*blake3::hash(canonical).as_bytes())
    }

    /// Create a new StateDigest from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for StateDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateDigest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for StateDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for StateDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// 2^64. Whole values must fit in a `u64`.
const WHOLE_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// A non-negative, finite estimated value.
///
/// Whole values are held as integers, so `5000`, `5000.0` and `"5000.00"`
/// are the same value and encode as `5000`. Fractional values are held as
/// `f64` and encode in shortest round-trip form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EstimatedValue(Number);

impl EstimatedValue {
    /// A whole value.
    pub fn from_u64(value: u64) -> Self {
        Self(Number::from(value))
    }

    /// A value from a float. Rejects negative, non-finite and oversized input.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "estimated value {} is not a non-negative number",
                value
            )));
        }
        if value.fract() == 0.0 {
            if value >= WHOLE_LIMIT {
                return Err(CoreError::InvalidArgument(format!(
                    "estimated value {} is out of range",
                    value
                )));
            }
            // Also folds -0.0 into 0
            return Ok(Self::from_u64(value as u64));
        }
        Number::from_f64(value).map(Self).ok_or_else(|| {
            CoreError::InvalidArgument(format!("estimated value {} is not representable", value))
        })
    }

    /// The value as a whole number, if it is one.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.as_u64()
    }

    /// The value as a float.
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }

    /// The JSON number written into records.
    pub fn as_number(&self) -> &Number {
        &self.0
    }
}

impl From<u64> for EstimatedValue {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Ord for EstimatedValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_u64(), other.as_u64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl PartialOrd for EstimatedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EstimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for EstimatedValue {
    /// Accepts a JSON number or a decimal string.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(EstimatedValueVisitor)
    }
}

struct EstimatedValueVisitor;

impl<'de> Visitor<'de> for EstimatedValueVisitor {
    type Value = EstimatedValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative number or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<EstimatedValue, E> {
        Ok(EstimatedValue::from_u64(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<EstimatedValue, E> {
        u64::try_from(v)
            .map(EstimatedValue::from_u64)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<EstimatedValue, E> {
        EstimatedValue::from_f64(v).map_err(|_| E::invalid_value(Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<EstimatedValue, E> {
        parse_estimated_value(v).map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}
