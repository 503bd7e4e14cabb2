//! The fixed asset set written by `InitLedger`.

use asset_ledger_core::Asset;

/// IDs of the seed assets, in key order.
pub const SEED_IDS: [&str; 6] = ["carro1", "carro2", "carro3", "carro4", "carro5", "carro6"];

/// The six seed assets, each tagged with the `asset` discriminator.
pub fn seed_assets() -> Vec<Asset> {
    vec![
        Asset::new("carro1", "TAD338", "2010", "Suzuki", "Blue", "Tomoko", 5000),
        Asset::new("carro2", "JZK041", "2020", "Ford", "Green", "Carlos", 15000),
        Asset::new("carro3", "MBK391", "2022", "Chevrolet", "Red", "Mario", 33000),
        Asset::new("carro4", "FAN238", "2003", "Nissan", "Black", "Edison", 3500),
        Asset::new("carro5", "JFA901", "2015", "Toyota", "White", "Juan", 8000),
        Asset::new("carro6", "GPQ023", "2018", "Renault", "Gray", "Hernan", 9700),
    ]
    .into_iter()
    .map(Asset::tagged)
    .collect()
}
