//! The AssetRegistry: state-transition functions over world state.
//!
//! Every operation takes the world state it runs against as an explicit
//! argument and keeps nothing between calls. Each one re-reads current state,
//! validates, and performs at most one write, after all validation.

use asset_ledger_core::{
    field, to_canonical_bytes, validate_asset_id, Asset, AssetDocument, EstimatedValue,
    StateDigest,
};
use asset_ledger_store::{KeyRange, WorldState};
use bytes::Bytes;
use serde::Serialize;

use crate::cursor::{AssetCursor, ListEntry};
use crate::error::{RegistryError, Result};
use crate::seed::seed_assets;

/// Configuration for the registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Whether `create_asset` writes the `docType` discriminator.
    ///
    /// Seed assets are always tagged. Turning this off reproduces records
    /// written by producers that never tagged created assets.
    pub tag_created_assets: bool,
    /// Entries fetched per range-scan page when listing.
    pub scan_page_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            tag_created_assets: true,
            scan_page_size: 100,
        }
    }
}

/// The asset registry.
///
/// Holds configuration only. World state is passed to every call.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    config: RegistryConfig,
}

impl AssetRegistry {
    /// Create a registry with the given configuration.
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────────────────────

    /// Write the six seed assets, overwriting whatever is at their keys.
    pub async fn init_ledger<S: WorldState + ?Sized>(&self, ctx: &S) -> Result<()> {
        for asset in seed_assets() {
            self.write(ctx, &asset.id, &asset).await?;
        }
        tracing::info!("seeded ledger");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Single-asset operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a new asset. Returns its canonical text.
    pub async fn create_asset<S: WorldState + ?Sized>(
        &self,
        ctx: &S,
        mut asset: Asset,
    ) -> Result<String> {
        validate_asset_id(&asset.id)?;

        if self.asset_exists(ctx, &asset.id).await? {
            return Err(RegistryError::AlreadyExists(asset.id));
        }

        if self.config.tag_created_assets {
            asset = asset.tagged();
        }

        let bytes = self.write(ctx, &asset.id, &asset).await?;
        tracing::info!(id = %asset.id, owner = %asset.owner, "created asset");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Return the stored text of an asset, exactly as stored.
    pub async fn read_asset<S: WorldState + ?Sized>(&self, ctx: &S, id: &str) -> Result<String> {
        let bytes = self.read_raw(ctx, id).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Repaint and revalue an asset. Returns the previous color.
    ///
    /// The estimated value may stay equal or decrease, never increase. A
    /// record without an estimated value accepts any new value.
    pub async fn update_asset<S: WorldState + ?Sized>(
        &self,
        ctx: &S,
        id: &str,
        new_color: &str,
        new_estimated_value: EstimatedValue,
    ) -> Result<String> {
        let mut doc = self.load(ctx, id).await?;

        if let Some(current) = doc.estimated_value()? {
            if new_estimated_value > current {
                return Err(RegistryError::ValueIncrease {
                    id: id.to_string(),
                    current,
                    proposed: new_estimated_value,
                });
            }
        }

        let old_color = doc.replace_text(field::COLOR, new_color);
        doc.set_estimated_value(&new_estimated_value);

        self.write(ctx, id, &doc).await?;
        tracing::info!(
            id,
            old_color = %old_color,
            new_color,
            new_estimated_value = %new_estimated_value,
            "updated asset"
        );
        Ok(old_color)
    }

    /// Remove an asset's key entirely.
    pub async fn delete_asset<S: WorldState + ?Sized>(&self, ctx: &S, id: &str) -> Result<()> {
        validate_asset_id(id)?;

        if !self.asset_exists(ctx, id).await? {
            return Err(RegistryError::NotFound(id.to_string()));
        }

        ctx.delete_state(id).await?;
        tracing::info!(id, "deleted asset");
        Ok(())
    }

    /// Whether a non-empty value is stored at `id`.
    pub async fn asset_exists<S: WorldState + ?Sized>(&self, ctx: &S, id: &str) -> Result<bool> {
        Ok(ctx
            .get_state(id)
            .await?
            .map_or(false, |value| !value.is_empty()))
    }

    /// Hand an asset to a new owner. Returns the previous owner.
    pub async fn transfer_asset<S: WorldState + ?Sized>(
        &self,
        ctx: &S,
        id: &str,
        new_owner: &str,
    ) -> Result<String> {
        let mut doc = self.load(ctx, id).await?;
        let old_owner = doc.replace_text(field::OWNER, new_owner);

        self.write(ctx, id, &doc).await?;
        tracing::info!(id, old_owner = %old_owner, new_owner, "transferred asset");
        Ok(old_owner)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Listing
    // ─────────────────────────────────────────────────────────────────────────

    /// Lazily enumerate the whole keyspace in key order.
    pub fn list_assets<'a, S: WorldState + ?Sized>(&self, ctx: &'a S) -> AssetCursor<'a, S> {
        self.list_range(ctx, KeyRange::new("", ""))
    }

    /// Lazily enumerate a key range in key order.
    pub fn list_range<'a, S: WorldState + ?Sized>(
        &self,
        ctx: &'a S,
        range: KeyRange,
    ) -> AssetCursor<'a, S> {
        AssetCursor::new(ctx, range, self.config.scan_page_size)
    }

    /// Every stored value in key order, as canonical JSON array text.
    ///
    /// Values that are not JSON appear as strings holding their raw text.
    pub async fn get_all_assets<S: WorldState + ?Sized>(&self, ctx: &S) -> Result<String> {
        let entries: Vec<ListEntry> = self.list_assets(ctx).collect_entries().await?;
        let bytes = to_canonical_bytes(&entries)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the raw, non-empty value at `id`.
    async fn read_raw<S: WorldState + ?Sized>(&self, ctx: &S, id: &str) -> Result<Bytes> {
        validate_asset_id(id)?;

        match ctx.get_state(id).await? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(RegistryError::NotFound(id.to_string())),
        }
    }

    /// Fetch the record at `id` for modification.
    async fn load<S: WorldState + ?Sized>(&self, ctx: &S, id: &str) -> Result<AssetDocument> {
        let bytes = self.read_raw(ctx, id).await?;
        Ok(AssetDocument::from_slice(&bytes)?)
    }

    /// Canonically encode `record` and store it under `key`.
    async fn write<S, T>(&self, ctx: &S, key: &str, record: &T) -> Result<Bytes>
    where
        S: WorldState + ?Sized,
        T: Serialize + ?Sized,
    {
        let bytes = Bytes::from(to_canonical_bytes(record)?);
        let digest = StateDigest::of(&bytes);

        ctx.put_state(key, bytes.clone()).await?;
        tracing::debug!(key, digest = %digest, "wrote asset");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset_ledger_store::MemoryWorldState;

    fn whole(value: u64) -> EstimatedValue {
        EstimatedValue::from_u64(value)
    }

    fn fraction(value: f64) -> EstimatedValue {
        EstimatedValue::from_f64(value).unwrap()
    }

    fn suzuki(id: &str) -> Asset {
        Asset::new(id, "TAD338", "2010", "Suzuki", "Blue", "Tomoko", 5000)
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();

        let created = registry.create_asset(&state, suzuki("a1")).await.unwrap();
        let read = registry.read_asset(&state, "a1").await.unwrap();
        assert_eq!(created, read);
        assert!(read.contains(r#""docType":"asset""#));
    }

    #[tokio::test]
    async fn test_create_untagged_when_configured() {
        let registry = AssetRegistry::new(RegistryConfig {
            tag_created_assets: false,
            ..RegistryConfig::default()
        });
        let state = MemoryWorldState::new();

        let created = registry.create_asset(&state, suzuki("a1")).await.unwrap();
        assert!(!created.contains("docType"));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_id() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();

        let err = registry.create_asset(&state, suzuki("")).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_create_over_empty_value_allowed() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        state.put_state("a1", Bytes::new()).await.unwrap();

        assert!(!registry.asset_exists(&state, "a1").await.unwrap());
        registry.create_asset(&state, suzuki("a1")).await.unwrap();
        assert!(registry.asset_exists(&state, "a1").await.unwrap());
    }

    #[tokio::test]
    async fn test_read_empty_value_is_not_found() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        state.put_state("a1", Bytes::new()).await.unwrap();

        let err = registry.read_asset(&state, "a1").await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(id) if id == "a1"));
    }

    #[tokio::test]
    async fn test_update_equal_value_allowed() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        registry.create_asset(&state, suzuki("a1")).await.unwrap();

        let old = registry
            .update_asset(&state, "a1", "Green", whole(5000))
            .await
            .unwrap();
        assert_eq!(old, "Blue");
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_state_untouched() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        registry.create_asset(&state, suzuki("a1")).await.unwrap();
        let before = registry.read_asset(&state, "a1").await.unwrap();

        let err = registry
            .update_asset(&state, "a1", "Red", whole(5001))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ValueIncrease { ref current, ref proposed, .. }
                if *current == whole(5000) && *proposed == whole(5001)
        ));
        assert_eq!(registry.read_asset(&state, "a1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_corrupt_record_is_decoding_error() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        state
            .put_state("a1", Bytes::from_static(b"{broken"))
            .await
            .unwrap();

        let err = registry
            .update_asset(&state, "a1", "Red", whole(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Decoding(_)));
        assert_eq!(
            state.get_state("a1").await.unwrap(),
            Some(Bytes::from_static(b"{broken"))
        );
    }

    #[tokio::test]
    async fn test_transfer_missing_is_not_found() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();

        let err = registry
            .transfer_asset(&state, "nope", "Carlos")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();

        let err = registry.delete_asset(&state, "nope").await.unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_writes_under_requested_key() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        // A record whose ID field disagrees with its key
        let stored = suzuki("other").to_canonical_bytes().unwrap();
        state.put_state("a1", Bytes::from(stored)).await.unwrap();

        registry
            .update_asset(&state, "a1", "Red", whole(10))
            .await
            .unwrap();
        assert!(state.get_state("other").await.unwrap().is_none());
        let text = registry.read_asset(&state, "a1").await.unwrap();
        assert!(text.contains(r#""Color":"Red""#));
    }

    #[tokio::test]
    async fn test_get_all_assets_empty() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        assert_eq!(registry.get_all_assets(&state).await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_create_fractional_value() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();

        let asset = suzuki("a1").with_estimated_value(fraction(4999.5));
        let created = registry.create_asset(&state, asset).await.unwrap();
        assert!(created.contains(r#""EstimatedValue":4999.5,"#));
    }

    #[tokio::test]
    async fn test_update_compares_fractional_values() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        let asset = suzuki("a1").with_estimated_value(fraction(4999.5));
        registry.create_asset(&state, asset).await.unwrap();

        let err = registry
            .update_asset(&state, "a1", "Red", fraction(4999.75))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::ValueIncrease { .. }));

        let err = registry
            .update_asset(&state, "a1", "Red", whole(5000))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::ValueIncrease { .. }));

        let old = registry
            .update_asset(&state, "a1", "Red", fraction(4999.25))
            .await
            .unwrap();
        assert_eq!(old, "Blue");
        let text = registry.read_asset(&state, "a1").await.unwrap();
        assert!(text.contains(r#""EstimatedValue":4999.25,"#));

        let old = registry
            .update_asset(&state, "a1", "Green", whole(4999))
            .await
            .unwrap();
        assert_eq!(old, "Red");
    }

    #[tokio::test]
    async fn test_transfer_fractional_record() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        state
            .put_state(
                "a1",
                Bytes::from_static(
                    br#"{"Brand":"b","Color":"c","EstimatedValue":4999.5,"ID":"a1","Model":"m","Owner":"Ana","Registration":"r"}"#,
                ),
            )
            .await
            .unwrap();

        let old = registry.transfer_asset(&state, "a1", "Luis").await.unwrap();
        assert_eq!(old, "Ana");
        assert_eq!(
            registry.read_asset(&state, "a1").await.unwrap(),
            r#"{"Brand":"b","Color":"c","EstimatedValue":4999.5,"ID":"a1","Model":"m","Owner":"Luis","Registration":"r"}"#
        );
    }

    #[tokio::test]
    async fn test_transfer_sparse_record() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        state
            .put_state(
                "c8",
                Bytes::from_static(br#"{"ID":"c8","Owner":"Ana","docType":"asset"}"#),
            )
            .await
            .unwrap();

        let old = registry.transfer_asset(&state, "c8", "Luis").await.unwrap();
        assert_eq!(old, "Ana");
        assert_eq!(
            registry.read_asset(&state, "c8").await.unwrap(),
            r#"{"ID":"c8","Owner":"Luis","docType":"asset"}"#
        );
    }

    #[tokio::test]
    async fn test_update_record_without_value() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        state
            .put_state("c8", Bytes::from_static(br#"{"ID":"c8","Color":"Blue"}"#))
            .await
            .unwrap();

        let old = registry
            .update_asset(&state, "c8", "Red", whole(100))
            .await
            .unwrap();
        assert_eq!(old, "Blue");
        assert_eq!(
            registry.read_asset(&state, "c8").await.unwrap(),
            r#"{"Color":"Red","EstimatedValue":100,"ID":"c8"}"#
        );
    }

    #[tokio::test]
    async fn test_update_malformed_value_is_decoding_error() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        let stored = Bytes::from_static(br#"{"ID":"c8","EstimatedValue":"unknown"}"#);
        state.put_state("c8", stored.clone()).await.unwrap();

        let err = registry
            .update_asset(&state, "c8", "Red", whole(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Decoding(_)));
        assert_eq!(state.get_state("c8").await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_transfer_non_object_is_decoding_error() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        state
            .put_state("a1", Bytes::from_static(b"[1,2,3]"))
            .await
            .unwrap();

        let err = registry
            .transfer_asset(&state, "a1", "Luis")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Decoding(_)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();

        let err = registry
            .update_asset(&state, "nope", "Red", whole(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(ref id) if id == "nope"));

        state.put_state("hollow", Bytes::new()).await.unwrap();
        let err = registry
            .update_asset(&state, "hollow", "Red", whole(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(ref id) if id == "hollow"));
        assert_eq!(state.get_state("hollow").await.unwrap(), Some(Bytes::new()));
    }

    #[tokio::test]
    async fn test_list_range_is_bounded() {
        let registry = AssetRegistry::default();
        let state = MemoryWorldState::new();
        registry.init_ledger(&state).await.unwrap();

        let mut cursor = registry.list_range(&state, KeyRange::new("carro2", "carro5"));
        let mut keys = Vec::new();
        while let Some((key, entry)) = cursor.next_entry().await.unwrap() {
            assert!(entry.as_record().is_some());
            keys.push(key);
        }
        assert_eq!(keys, vec!["carro2", "carro3", "carro4"]);
    }

    #[test]
    fn test_config_defaults() {
        let registry = AssetRegistry::default();
        assert!(registry.config().tag_created_assets);
        assert_eq!(registry.config().scan_page_size, 100);

        let registry = AssetRegistry::new(RegistryConfig {
            scan_page_size: 7,
            ..RegistryConfig::default()
        });
        assert_eq!(registry.config().scan_page_size, 7);
    }
}
