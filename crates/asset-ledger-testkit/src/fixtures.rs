//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use asset_ledger::{AssetRegistry, RegistryConfig};
use asset_ledger_core::Asset;
use asset_ledger_store::{MemoryWorldState, Result, WorldState};
use bytes::Bytes;

/// A test fixture with a registry and in-memory world state.
pub struct TestFixture {
    pub registry: AssetRegistry,
    pub state: MemoryWorldState,
}

impl TestFixture {
    /// Create a fixture with the default configuration and empty state.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a fixture with a specific configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            registry: AssetRegistry::new(config),
            state: MemoryWorldState::new(),
        }
    }

    /// Create a fixture whose state already holds the seed assets.
    pub async fn seeded() -> Self {
        let fixture = Self::new();
        fixture
            .registry
            .init_ledger(&fixture.state)
            .await
            .expect("seeding in-memory state cannot fail");
        fixture
    }

    /// Build an untagged asset with fixed descriptive fields.
    pub fn make_asset(&self, id: &str, estimated_value: u64) -> Asset {
        Asset::new(id, "TST001", "2024", "Fiat", "Silver", "Tester", estimated_value)
    }

    /// Write raw bytes under `key`, bypassing the registry.
    pub async fn put_raw(&self, key: &str, value: &[u8]) -> Result<()> {
        self.state
            .put_state(key, Bytes::copy_from_slice(value))
            .await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a test-friendly tracing subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_ledger::SEED_IDS;

    #[tokio::test]
    async fn test_seeded_fixture_holds_seed_ids() {
        let fixture = TestFixture::seeded().await;
        for id in SEED_IDS {
            assert!(fixture
                .registry
                .asset_exists(&fixture.state, id)
                .await
                .unwrap());
        }
        assert_eq!(fixture.state.len().unwrap(), SEED_IDS.len());
    }

    #[tokio::test]
    async fn test_put_raw_bypasses_registry() {
        let fixture = TestFixture::new();
        fixture.put_raw("junk", b"not json").await.unwrap();
        assert_eq!(
            fixture.registry.read_asset(&fixture.state, "junk").await.unwrap(),
            "not json"
        );
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
