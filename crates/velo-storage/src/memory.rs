//! In-memory storage adapter.
//!
//! Useful for tests and short-lived sessions. Data is not persisted across
//! restarts.

use std::sync::RwLock;

use tracing::debug;
use velo_core::Configuration;

use crate::adapter::StorageAdapter;
use crate::error::{StorageError, StorageResult};

/// In-memory storage adapter.
///
/// Records are kept in insertion order behind an `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    configurations: RwLock<Vec<Configuration>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with records.
    pub fn with_configurations(configurations: Vec<Configuration>) -> Self {
        Self {
            configurations: RwLock::new(configurations),
        }
    }

    /// Clears all data from storage.
    pub fn clear(&self) -> StorageResult<()> {
        self.configurations
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?
            .clear();
        Ok(())
    }
}

impl StorageAdapter for InMemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn is_healthy(&self) -> bool {
        self.configurations.read().is_ok()
    }

    fn store_configuration(&self, configuration: &Configuration) -> StorageResult<()> {
        let mut configurations = self
            .configurations
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;

        if configurations.iter().any(|c| c.id == configuration.id) {
            return Err(StorageError::DuplicateKey {
                entity_type: "Configuration",
                key: configuration.id.to_string(),
            });
        }

        debug!(id = %configuration.id, backend = "memory", "Storing configuration");
        configurations.push(configuration.clone());
        Ok(())
    }

    fn get_configuration(&self, id: &str) -> StorageResult<Option<Configuration>> {
        Ok(self
            .configurations
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?
            .iter()
            .find(|c| c.id.as_str() == id)
            .cloned())
    }

    fn delete_configuration(&self, id: &str) -> StorageResult<bool> {
        let mut configurations = self
            .configurations
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        let initial_len = configurations.len();
        configurations.retain(|c| c.id.as_str() != id);
        Ok(configurations.len() < initial_len)
    }

    fn list_configurations(&self) -> StorageResult<Vec<Configuration>> {
        Ok(self
            .configurations
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?
            .clone())
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
            SelectionState::new().with("wheels", "road"),
            dec!(80),
        )
    }

    #[test]
    fn test_store_and_get() {
        let storage = InMemoryStorage::new();
        storage.store_configuration(&record("MK00001")).unwrap();

        let loaded = storage.get_configuration("MK00001").unwrap().unwrap();
        assert_eq!(loaded.total_price, dec!(80));
        assert!(storage.get_configuration("MK99999").unwrap().is_none());
        assert!(storage.contains("MK00001").unwrap());
    }

    #[test]
    fn test_duplicate_rejected() {
        let storage = InMemoryStorage::new();
        storage.store_configuration(&record("MK00001")).unwrap();
        let err = storage.store_configuration(&record("MK00001")).unwrap_err();
        assert!(matches!(err, StorageError::DuplicateKey { .. }));
    }

    #[test]
    fn test_list_keeps_insertion_order_and_delete() {
        let storage = InMemoryStorage::new();
        for id in ["MKZZZZZ", "MK00000", "MKAAAAA"] {
            storage.store_configuration(&record(id)).unwrap();
        }

        let ids: Vec<String> = storage
            .list_configurations()
            .unwrap()
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["MKZZZZZ", "MK00000", "MKAAAAA"]);

        assert!(storage.delete_configuration("MK00000").unwrap());
        assert!(!storage.delete_configuration("MK00000").unwrap());
        assert_eq!(storage.stats().unwrap().configuration_count, 2);

        storage.clear().unwrap();
        assert!(storage.list_configurations().unwrap().is_empty());
    }
}
