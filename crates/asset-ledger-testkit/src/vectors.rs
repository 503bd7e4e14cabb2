//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the exact stored bytes of asset records. Any node
//! that writes a different byte sequence for the same asset would commit a
//! different state hash.

use asset_ledger::seed_assets;
use asset_ledger_core::{Asset, EstimatedValue};
use serde_json::Value;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The record to encode.
    pub asset: Asset,
    /// Expected canonical text.
    pub expected_canonical: &'static str,
}

impl GoldenVector {
    /// Encode the asset and return the produced text.
    pub fn encode(&self) -> String {
        let bytes = self
            .asset
            .to_canonical_bytes()
            .unwrap_or_else(|e| panic!("vector {} failed to encode: {}", self.name, e));
        String::from_utf8(bytes).unwrap_or_else(|e| panic!("vector {} not UTF-8: {}", self.name, e))
    }

    /// Whether the produced text matches the expectation.
    pub fn matches(&self) -> bool {
        self.encode() == self.expected_canonical
    }
}

const SEED_CANONICAL: [&str; 6] = [
    r#"{"Brand":"Suzuki","Color":"Blue","EstimatedValue":5000,"ID":"carro1","Model":"2010","Owner":"Tomoko","Registration":"TAD338","docType":"asset"}"#,
    r#"{"Brand":"Ford","Color":"Green","EstimatedValue":15000,"ID":"carro2","Model":"2020","Owner":"Carlos","Registration":"JZK041","docType":"asset"}"#,
    r#"{"Brand":"Chevrolet","Color":"Red","EstimatedValue":33000,"ID":"carro3","Model":"2022","Owner":"Mario","Registration":"MBK391","docType":"asset"}"#,
    r#"{"Brand":"Nissan","Color":"Black","EstimatedValue":3500,"ID":"carro4","Model":"2003","Owner":"Edison","Registration":"FAN238","docType":"asset"}"#,
    r#"{"Brand":"Toyota","Color":"White","EstimatedValue":8000,"ID":"carro5","Model":"2015","Owner":"Juan","Registration":"JFA901","docType":"asset"}"#,
    r#"{"Brand":"Renault","Color":"Gray","EstimatedValue":9700,"ID":"carro6","Model":"2018","Owner":"Hernan","Registration":"GPQ023","docType":"asset"}"#,
];

const SEED_NAMES: [&str; 6] = [
    "seed carro1",
    "seed carro2",
    "seed carro3",
    "seed carro4",
    "seed carro5",
    "seed carro6",
];

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let mut vectors: Vec<GoldenVector> = seed_assets()
        .into_iter()
        .zip(SEED_NAMES.into_iter().zip(SEED_CANONICAL))
        .map(|(asset, (name, expected))| GoldenVector {
            name,
            asset,
            expected_canonical: expected,
        })
        .collect();

    vectors.push(GoldenVector {
        name: "untagged record omits docType",
        asset: Asset::new("x1", "ABC123", "2021", "Kia", "Blue", "Ana", 7000),
        expected_canonical: r#"{"Brand":"Kia","Color":"Blue","EstimatedValue":7000,"ID":"x1","Model":"2021","Owner":"Ana","Registration":"ABC123"}"#,
    });

    vectors.push(GoldenVector {
        name: "fractional value keeps its cents",
        asset: Asset::new("x2", "ABC124", "2021", "Kia", "Blue", "Ana", 0)
            .with_estimated_value(
                EstimatedValue::from_f64(4999.5).expect("4999.5 is a valid estimated value"),
            )
            .tagged(),
        expected_canonical: r#"{"Brand":"Kia","Color":"Blue","EstimatedValue":4999.5,"ID":"x2","Model":"2021","Owner":"Ana","Registration":"ABC124","docType":"asset"}"#,
    });

    vectors.push(GoldenVector {
        name: "zero value",
        asset: Asset::new("z", "", "", "", "", "", 0).tagged(),
        expected_canonical: r#"{"Brand":"","Color":"","EstimatedValue":0,"ID":"z","Model":"","Owner":"","Registration":"","docType":"asset"}"#,
    });

    vectors.push(GoldenVector {
        name: "quotes, backslash and control characters escaped",
        asset: Asset::new(
            "esc",
            "A\\B",
            "2000",
            "Say \"hi\"",
            "Red\tBlue",
            "Ana\nMaría",
            1,
        ),
        expected_canonical: r#"{"Brand":"Say \"hi\"","Color":"Red\tBlue","EstimatedValue":1,"ID":"esc","Model":"2000","Owner":"Ana\nMaría","Registration":"A\\B"}"#,
    });

    let mut with_extra = Asset::new("ext", "EXT001", "2019", "Mazda", "Blue", "Eva", 4000).tagged();
    with_extra
        .extra
        .insert("Insured".to_string(), Value::Bool(true));
    with_extra
        .extra
        .insert("Accessories".to_string(), serde_json::json!({"z": 1, "a": [2, 1]}));
    vectors.push(GoldenVector {
        name: "unknown fields kept and sorted",
        asset: with_extra,
        expected_canonical: r#"{"Accessories":{"a":[2,1],"z":1},"Brand":"Mazda","Color":"Blue","EstimatedValue":4000,"ID":"ext","Insured":true,"Model":"2019","Owner":"Eva","Registration":"EXT001","docType":"asset"}"#,
    });

    vectors
}

/// Verify all golden vectors, returning `(name, matched, produced)` per vector.
pub fn verify_all_vectors() -> Vec<(&'static str, bool, String)> {
    all_vectors()
        .into_iter()
        .map(|v| {
            let produced = v.encode();
            let matched = produced == v.expected_canonical;
            (v.name, matched, produced)
        })
        .collect()
}
