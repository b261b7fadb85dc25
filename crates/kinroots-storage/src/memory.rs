//! In-memory storage backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::LineageStore;
use async_trait::async_trait;
use kinroots_core::Lineage;
use std::sync::RwLock;

/// In-memory storage backend
///
/// Useful for testing and ephemeral runs.
pub struct MemoryStore {
    lineage: RwLock<Lineage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            lineage: RwLock::new(Lineage::new()),
        }
    }

    /// Seed the store with an initial snapshot
    pub fn with_lineage(lineage: Lineage) -> Self {
        Self {
            lineage: RwLock::new(lineage),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineageStore for MemoryStore {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn load_lineage(&self) -> StorageResult<Lineage> {
        let lineage = self
            .lineage
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        Ok(lineage.clone())
    }

    async fn save_lineage(&self, lineage: &Lineage) -> StorageResult<()> {
        let mut stored = self
            .lineage
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        *stored = lineage.clone();
        Ok(())
    }
}
