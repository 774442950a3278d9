//! RedbStorage implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;
use velo_core::Configuration;

use crate::adapter::{StorageAdapter, StorageStats};
use crate::error::{StorageError, StorageResult};

const CONFIGURATIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("configurations");

/// Redb-based storage adapter.
///
/// Configurations are stored as JSON values keyed by id in a single table.
///
/// # Example
///
/// ```rust,ignore
/// use velo_storage::{RedbStorage, StorageAdapter};
///
/// let storage = RedbStorage::open("./configurations.redb")?;
/// assert!(storage.is_healthy());
/// ```
pub struct RedbStorage {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbStorage {
    /// Opens or creates a database at the given path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        let storage = Self {
            db: Arc::new(db),
            path: path.to_path_buf(),
        };
        storage.initialize_tables()?;
        Ok(storage)
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(CONFIGURATIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl StorageAdapter for RedbStorage {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    fn is_healthy(&self) -> bool {
        self.db.begin_read().is_ok()
    }

    fn store_configuration(&self, configuration: &Configuration) -> StorageResult<()> {
        let data = serde_json::to_vec(configuration)?;
        let key = configuration.id.as_str();

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CONFIGURATIONS_TABLE)?;
            let exists = table.get(key)?.is_some();
            if exists {
                return Err(StorageError::DuplicateKey {
                    entity_type: "Configuration",
                    key: key.to_string(),
                });
            }
            table.insert(key, data.as_slice())?;
        }
        write_txn.commit()?;

        debug!(id = key, backend = "redb", "Stored configuration");
        Ok(())
    }

    fn get_configuration(&self, id: &str) -> StorageResult<Option<Configuration>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CONFIGURATIONS_TABLE)?;
        match table.get(id)? {
            Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    fn delete_configuration(&self, id: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(CONFIGURATIONS_TABLE)?;
            let removed = table.remove(id)?;
            removed.is_some()
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    fn list_configurations(&self) -> StorageResult<Vec<Configuration>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CONFIGURATIONS_TABLE)?;

        let mut results = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let configuration: Configuration = serde_json::from_slice(value.value())?;
            results.push(configuration);
        }

        // Keys iterate in id order; callers expect creation order.
        results.sort_by_key(|c| c.created_at);
        Ok(results)
    }

    fn stats(&self) -> StorageResult<StorageStats> {
        Ok(StorageStats {
            configuration_count: self.list_configurations()?.len(),
            file_size_bytes: std::fs::metadata(&self.path).ok().map(|m| m.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use velo_core::{ConfigurationId, SelectionState};

    fn record(id: &str) -> Configuration {
        Configuration::new(
            ConfigurationId::new(id),
            SelectionState::new().with("frame-type", "diamond"),
            dec!(100),
        )
    }

    #[test]
    fn test_store_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("nested").join("velo.redb")).unwrap();
        assert!(storage.is_healthy());
        assert_eq!(storage.backend_name(), "redb");

        storage.store_configuration(&record("MK00001")).unwrap();
        let loaded = storage.get_configuration("MK00001").unwrap().unwrap();
        assert_eq!(loaded.id.as_str(), "MK00001");
        assert_eq!(loaded.total_price, dec!(100));

        assert!(matches!(
            storage.store_configuration(&record("MK00001")),
            Err(StorageError::DuplicateKey { .. })
        ));

        assert!(storage.delete_configuration("MK00001").unwrap());
        assert!(storage.get_configuration("MK00001").unwrap().is_none());
    }

    #[test]
    fn test_stats_reports_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("velo.redb")).unwrap();
        storage.store_configuration(&record("MK00001")).unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.configuration_count, 1);
        assert!(stats.file_size_bytes.unwrap_or(0) > 0);
    }
}
