//! Property tests for registry operations.

use asset_ledger::store::MemoryWorldState;
use asset_ledger::{Asset, AssetRegistry, RegistryError};
use asset_ledger_testkit::generators::{asset, estimated_value};
use proptest::prelude::*;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_created_record_reads_back(asset in asset()) {
        let rt = runtime();
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();

        let (created, read) = rt.block_on(async {
            let created = registry.create_asset(&state, asset.clone()).await.unwrap();
            let read = registry.read_asset(&state, &asset.id).await.unwrap();
            (created, read)
        });

        prop_assert_eq!(&created, &read);
        let decoded = Asset::from_slice(read.as_bytes()).unwrap();
        prop_assert_eq!(decoded, asset.tagged());
    }

    #[test]
    fn prop_value_never_increases(
        asset in asset(),
        proposed in estimated_value(),
    ) {
        let rt = runtime();
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        let current = asset.estimated_value.clone();

        let (result, after) = rt.block_on(async {
            registry.create_asset(&state, asset.clone()).await.unwrap();
            let result = registry
                .update_asset(&state, &asset.id, "Painted", proposed.clone())
                .await;
            let after = registry.read_asset(&state, &asset.id).await.unwrap();
            (result, after)
        });

        let stored = Asset::from_slice(after.as_bytes()).unwrap();
        if proposed > current {
            let rejected = matches!(result, Err(RegistryError::ValueIncrease { .. }));
            prop_assert!(rejected);
            prop_assert_eq!(stored.estimated_value, current);
            prop_assert_eq!(stored.color, asset.color);
        } else {
            prop_assert_eq!(result.unwrap(), asset.color);
            prop_assert_eq!(stored.estimated_value, proposed);
            prop_assert_eq!(stored.color, "Painted");
        }
    }

    #[test]
    fn prop_transfer_touches_only_owner(asset in asset(), new_owner in "[A-Za-z]{1,12}") {
        let rt = runtime();
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();

        let (previous, after) = rt.block_on(async {
            registry.create_asset(&state, asset.clone()).await.unwrap();
            let previous = registry
                .transfer_asset(&state, &asset.id, &new_owner)
                .await
                .unwrap();
            let after = registry.read_asset(&state, &asset.id).await.unwrap();
            (previous, after)
        });

        prop_assert_eq!(&previous, &asset.owner);
        let mut expected = asset.tagged();
        expected.owner = new_owner;
        prop_assert_eq!(Asset::from_slice(after.as_bytes()).unwrap(), expected);
    }
}
