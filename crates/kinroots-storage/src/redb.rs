//! ReDB storage backend: the local single-file variant

use crate::error::{StorageError, StorageResult};
use crate::traits::LineageStore;
use async_trait::async_trait;
use kinroots_core::{Lineage, Person};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Mutex;

// Person records keyed by id, JSON values
const PEOPLE: TableDefinition<&str, &[u8]> = TableDefinition::new("people");

/// ReDB storage backend
pub struct RedbStore {
    db: Mutex<Database>,
}

impl RedbStore {
    /// Open or create a ReDB database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

        // Initialize tables
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| StorageError::Database(e.to_string()))?;
            {
                let _ = write_txn.open_table(PEOPLE);
            }
            write_txn
                .commit()
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        Ok(Self { db: Mutex::new(db) })
    }
}

#[async_trait]
impl LineageStore for RedbStore {
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
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let read_txn = db
            .begin_read()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let table = read_txn.open_table(PEOPLE)?;

        let mut people = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let person: Person = serde_json::from_slice(value.value())?;
            people.push(person);
        }

        tracing::debug!(count = people.len(), "loaded lineage from redb");
        Ok(Lineage::from_people(people))
    }

    async fn save_lineage(&self, lineage: &Lineage) -> StorageResult<()> {
        let db = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let write_txn = db
            .begin_write()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        {
            // Wholesale replace: drop the table and rewrite the snapshot
            write_txn
                .delete_table(PEOPLE)
                .map_err(|e| StorageError::Database(e.to_string()))?;
            let mut table = write_txn.open_table(PEOPLE)?;
            for person in lineage.iter() {
                let value = serde_json::to_vec(person)?;
                table.insert(person.id.as_str(), value.as_slice())?;
            }
        }
        write_txn.commit()?;

        tracing::debug!(count = lineage.len(), "saved lineage to redb");
        Ok(())
    }
}
