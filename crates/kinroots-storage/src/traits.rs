//! Storage capability trait

use crate::error::StorageResult;
use async_trait::async_trait;
use kinroots_core::Lineage;

/// Trait for lineage storage backends
///
/// The unit of persistence is the whole snapshot: readers load the full
/// person collection, writers replace it wholesale. No conflict resolution
/// or multi-writer consistency is provided; last write wins.
#[async_trait]
pub trait LineageStore: Send + Sync {
    /// Initialize the storage (create tables, reach the endpoint, etc.)
    async fn initialize(&self) -> StorageResult<()>;

    /// Close the storage connection
    async fn close(&self) -> StorageResult<()>;

    /// Health check
    async fn health_check(&self) -> StorageResult<bool>;

    /// Load the full person collection
    async fn load_lineage(&self) -> StorageResult<Lineage>;

    /// Replace the stored collection with the given snapshot
    async fn save_lineage(&self, lineage: &Lineage) -> StorageResult<()>;
}
