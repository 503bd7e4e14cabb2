//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Value};

use asset_ledger_core::{Asset, EstimatedValue};

/// Largest value every JSON consumer can hold exactly.
const MAX_SAFE_VALUE: u64 = (1 << 53) - 1;

/// Generate a valid asset ID.
pub fn asset_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,15}".prop_map(String::from)
}

/// Generate a descriptive text field, including characters that need escaping.
pub fn text_field() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z0-9 ]{0,16}".prop_map(String::from),
        1 => any::<String>(),
    ]
}

/// Generate an estimated value: mostly whole amounts, some with cents.
pub fn estimated_value() -> impl Strategy<Value = EstimatedValue> {
    prop_oneof![
        3 => (0u64..=MAX_SAFE_VALUE).prop_map(EstimatedValue::from_u64),
        1 => (0u64..1_000_000_000).prop_filter_map("representable", |cents| {
            EstimatedValue::from_f64(cents as f64 / 100.0).ok()
        }),
    ]
}

/// Parameters for generating an asset.
#[derive(Debug, Clone)]
pub struct AssetParams {
    pub id: String,
    pub registration: String,
    pub model: String,
    pub brand: String,
    pub color: String,
    pub owner: String,
    pub estimated_value: EstimatedValue,
    pub tagged: bool,
}

impl AssetParams {
    /// Build the asset these parameters describe.
    pub fn build(&self) -> Asset {
        let asset = Asset::new(
            self.id.as_str(),
            self.registration.as_str(),
            self.model.as_str(),
            self.brand.as_str(),
            self.color.as_str(),
            self.owner.as_str(),
            0,
        )
        .with_estimated_value(self.estimated_value.clone());
        if self.tagged {
            asset.tagged()
        } else {
            asset
        }
    }
}

impl Arbitrary for AssetParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            asset_id(),
            text_field(),
            "[0-9]{4}",
            text_field(),
            text_field(),
            text_field(),
            estimated_value(),
            any::<bool>(),
        )
            .prop_map(
                |(id, registration, model, brand, color, owner, estimated_value, tagged)| {
                    AssetParams {
                        id,
                        registration,
                        model,
                        brand,
                        color,
                        owner,
                        estimated_value,
                        tagged,
                    }
                },
            )
            .boxed()
    }
}

/// Generate an asset.
pub fn asset() -> impl Strategy<Value = Asset> {
    any::<AssetParams>().prop_map(|params| params.build())
}

/// Generate an asset together with a JSON object holding the same fields
/// inserted in a random order.
pub fn asset_and_shuffled_json() -> impl Strategy<Value = (Asset, Value)> {
    asset().prop_flat_map(|asset| {
        let fields = asset_fields(&asset);
        Just(fields).prop_shuffle().prop_map(move |fields| {
            let object: Map<String, Value> = fields.into_iter().collect();
            (asset.clone(), Value::Object(object))
        })
    })
}

fn asset_fields(asset: &Asset) -> Vec<(String, Value)> {
    let mut fields = vec![
        ("ID".to_string(), Value::from(asset.id.as_str())),
        ("Registration".to_string(), Value::from(asset.registration.as_str())),
        ("Model".to_string(), Value::from(asset.model.as_str())),
        ("Brand".to_string(), Value::from(asset.brand.as_str())),
        ("Color".to_string(), Value::from(asset.color.as_str())),
        ("Owner".to_string(), Value::from(asset.owner.as_str())),
        (
            "EstimatedValue".to_string(),
            Value::Number(asset.estimated_value.as_number().clone()),
        ),
    ];
    if let Some(doc_type) = &asset.doc_type {
        fields.push(("docType".to_string(), Value::from(doc_type.as_str())));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_ledger_core::canonical_json;

    proptest! {
        #[test]
        fn prop_field_order_is_irrelevant((asset, shuffled) in asset_and_shuffled_json()) {
            let from_struct = asset.to_canonical_bytes().unwrap();
            let from_value = canonical_json(&shuffled).unwrap();
            prop_assert_eq!(from_struct, from_value);
        }

        #[test]
        fn prop_canonical_decodes_to_same_asset(asset in asset()) {
            let bytes = asset.to_canonical_bytes().unwrap();
            let decoded = Asset::from_slice(&bytes).unwrap();
            prop_assert_eq!(decoded, asset);
        }

        #[test]
        fn prop_digest_stable_under_reencoding(asset in asset()) {
            let bytes = asset.to_canonical_bytes().unwrap();
            let decoded = Asset::from_slice(&bytes).unwrap();
            prop_assert_eq!(decoded.digest().unwrap(), asset.digest().unwrap());
        }
    }
}
