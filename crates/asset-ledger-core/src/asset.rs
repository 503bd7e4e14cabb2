//! The asset record stored in world state.
//!
//! Field names on the wire are fixed (`ID`, `Registration`, ..., `docType`)
//! and must not change: they are part of every stored record's bytes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::canonical::{decode, to_canonical_bytes};
use crate::error::{CoreError, Result};
use crate::types::{EstimatedValue, StateDigest};

/// Discriminator written into the `docType` field of asset records.
pub const ASSET_DOC_TYPE: &str = "asset";

/// Wire names of record fields.
pub mod field {
    pub const COLOR: &str = "Color";
    pub const OWNER: &str = "Owner";
    pub const ESTIMATED_VALUE: &str = "EstimatedValue";
}

/// A registered asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Key of the record in world state. Immutable after creation.
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Registration")]
    pub registration: String,

    /// Year/model label.
    #[serde(rename = "Model")]
    pub model: String,

    #[serde(rename = "Brand")]
    pub brand: String,

    #[serde(rename = "Color")]
    pub color: String,

    /// Current holder.
    #[serde(rename = "Owner")]
    pub owner: String,

    /// May only decrease through an update.
    #[serde(rename = "EstimatedValue")]
    pub estimated_value: EstimatedValue,

    #[serde(rename = "docType", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    /// Fields written by other producers. Carried through read-modify-write.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    /// Create an untagged asset.
    pub fn new(
        id: impl Into<String>,
        registration: impl Into<String>,
        model: impl Into<String>,
        brand: impl Into<String>,
        color: impl Into<String>,
        owner: impl Into<String>,
        estimated_value: u64,
    ) -> Self {
        Self {
            id: id.into(),
            registration: registration.into(),
            model: model.into(),
            brand: brand.into(),
            color: color.into(),
            owner: owner.into(),
            estimated_value: EstimatedValue::from_u64(estimated_value),
            doc_type: None,
            extra: Map::new(),
        }
    }

    /// Replace the estimated value, e.g. with a fractional one.
    pub fn with_estimated_value(mut self, estimated_value: EstimatedValue) -> Self {
        self.estimated_value = estimated_value;
        self
    }

    /// Set the `docType` discriminator to [`ASSET_DOC_TYPE`].
    pub fn tagged(mut self) -> Self {
        self.doc_type = Some(ASSET_DOC_TYPE.to_string());
        self
    }

    /// Encode to canonical JSON bytes.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>> {
        to_canonical_bytes(self)
    }

    /// Decode from stored bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        decode(bytes)
    }

    /// Digest of the canonical encoding.
    pub fn digest(&self) -> Result<StateDigest> {
        Ok(StateDigest::of(&self.to_canonical_bytes()?))
    }
}

/// A stored record opened for modification.
///
/// Only the fields an operation changes are interpreted. Everything else,
/// including missing or unexpected fields, is carried through as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssetDocument {
    fields: Map<String, Value>,
}

impl AssetDocument {
    /// Decode stored bytes. Anything but a JSON object is a decoding error.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match decode::<Value>(bytes)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(CoreError::Decoding(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Text of a field: strings as-is, other values as JSON, absent as empty.
    pub fn text(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Set a text field, returning its previous text.
    pub fn replace_text(&mut self, name: &str, value: &str) -> String {
        let previous = self.text(name);
        self.fields
            .insert(name.to_string(), Value::String(value.to_string()));
        previous
    }

    /// The stored estimated value, `None` if the record has none.
    pub fn estimated_value(&self) -> Result<Option<EstimatedValue>> {
        match self.fields.get(field::ESTIMATED_VALUE) {
            None => Ok(None),
            Some(value) => EstimatedValue::deserialize(value)
                .map(Some)
                .map_err(|e| CoreError::Decoding(format!("{}: {}", field::ESTIMATED_VALUE, e))),
        }
    }

    /// Set the estimated value.
    pub fn set_estimated_value(&mut self, value: &EstimatedValue) {
        self.fields.insert(
            field::ESTIMATED_VALUE.to_string(),
            Value::Number(value.as_number().clone()),
        );
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
