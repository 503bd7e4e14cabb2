//! Canonical JSON encoding for deterministic serialization.
//!
//! Every record written to world state goes through this module:
//! - Object keys sorted at every depth, by UTF-16 code units
//! - No whitespace between tokens
//! - Integers in plain decimal; integral floats below 2^53 collapse to integers
//! - Other finite floats in shortest round-trip form
//! - Strings escaped exactly as `serde_json` escapes them
//!
//! The canonical encoding is critical: replicas commit hashes of these bytes,
//! so the same logical record must produce identical bytes on every node.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{CoreError, EncodingError, Result};

/// Maximum nesting depth of arrays and objects.
pub const MAX_DEPTH: usize = 128;

/// 2^53. Integral floats below this magnitude are written as integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Serialize any value and encode it canonically.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let value = serde_json::to_value(value)
        .map_err(|e| EncodingError::UnsupportedValue(e.to_string()))?;
    canonical_json(&value)
}

/// Encode a JSON value to canonical bytes.
pub fn canonical_json(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value, 0)?;
    Ok(buf)
}

/// Decode bytes produced by [`canonical_json`] (or any JSON) into `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| CoreError::Decoding(e.to_string()))
}

/// Recursively encode a JSON value.
fn encode_value_to(
    buf: &mut Vec<u8>,
    value: &Value,
    depth: usize,
) -> std::result::Result<(), EncodingError> {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => encode_number(buf, n)?,
        Value::String(s) => encode_string(buf, s)?,
        Value::Array(arr) => encode_array(buf, arr, depth)?,
        Value::Object(map) => encode_object_canonical(buf, map, depth)?,
    }
    Ok(())
}

/// Encode a number in its single canonical form.
fn encode_number(buf: &mut Vec<u8>, n: &Number) -> std::result::Result<(), EncodingError> {
    if let Some(u) = n.as_u64() {
        buf.extend_from_slice(u.to_string().as_bytes());
        return Ok(());
    }
    if let Some(i) = n.as_i64() {
        buf.extend_from_slice(i.to_string().as_bytes());
        return Ok(());
    }

    let f = n
        .as_f64()
        .ok_or_else(|| EncodingError::UnsupportedValue(format!("number {}", n)))?;
    if !f.is_finite() {
        return Err(EncodingError::UnsupportedValue(format!("non-finite number {}", f)));
    }

    if f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER {
        // Also folds -0.0 into 0
        buf.extend_from_slice((f as i64).to_string().as_bytes());
    } else {
        serde_json::to_writer(&mut *buf, &f)
            .map_err(|e| EncodingError::UnsupportedValue(e.to_string()))?;
    }
    Ok(())
}

/// Encode a quoted, escaped string.
fn encode_string(buf: &mut Vec<u8>, s: &str) -> std::result::Result<(), EncodingError> {
    serde_json::to_writer(&mut *buf, s).map_err(|e| EncodingError::UnsupportedValue(e.to_string()))
}

/// Encode an array, preserving element order.
fn encode_array(
    buf: &mut Vec<u8>,
    arr: &[Value],
    depth: usize,
) -> std::result::Result<(), EncodingError> {
    if depth >= MAX_DEPTH {
        return Err(EncodingError::TooDeep(MAX_DEPTH));
    }

    buf.push(b'[');
    for (i, item) in arr.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_value_to(buf, item, depth + 1)?;
    }
    buf.push(b']');
    Ok(())
}

/// Encode an object canonically.
///
/// Keys are sorted by UTF-16 code units, independent of insertion order.
fn encode_object_canonical(
    buf: &mut Vec<u8>,
    map: &Map<String, Value>,
    depth: usize,
) -> std::result::Result<(), EncodingError> {
    if depth >= MAX_DEPTH {
        return Err(EncodingError::TooDeep(MAX_DEPTH));
    }

    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.encode_utf16().cmp(b.0.encode_utf16()));

    buf.push(b'{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_string(buf, key)?;
        buf.push(b':');
        encode_value_to(buf, value, depth + 1)?;
    }
    buf.push(b'}');
    Ok(())
}
