//! Storage adapter trait definition.

use velo_core::Configuration;

use crate::error::StorageResult;

/// Core storage adapter trait.
///
/// Backends hold saved [`Configuration`] records only. The in-progress
/// selection is never persisted.
///
/// # Example
///
/// ```rust
/// use velo_storage::{InMemoryStorage, StorageAdapter};
///
/// let storage = InMemoryStorage::new();
/// assert!(storage.is_healthy());
/// assert!(storage.list_configurations().unwrap().is_empty());
/// ```
pub trait StorageAdapter: Send + Sync {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Checks if the storage is healthy and accessible.
    fn is_healthy(&self) -> bool;

    /// Stores a new configuration.
    ///
    /// Fails with `DuplicateKey` if a record with the same id exists.
    fn store_configuration(&self, configuration: &Configuration) -> StorageResult<()>;

    /// Retrieves a configuration by id.
    fn get_configuration(&self, id: &str) -> StorageResult<Option<Configuration>>;

    /// Deletes a configuration by id. Returns true if it existed.
    fn delete_configuration(&self, id: &str) -> StorageResult<bool>;

    /// Lists all configurations in creation order.
    fn list_configurations(&self) -> StorageResult<Vec<Configuration>>;

    /// Returns true if a configuration with this id exists.
    fn contains(&self, id: &str) -> StorageResult<bool> {
        Ok(self.get_configuration(id)?.is_some())
    }

    /// Returns storage statistics.
    fn stats(&self) -> StorageResult<StorageStats> {
        Ok(StorageStats {
            configuration_count: self.list_configurations()?.len(),
            file_size_bytes: None,
        })
    }
}

/// Storage statistics.
#[derive(Debug, Clone, Default)]
pub struct StorageStats {
    /// Number of saved configurations.
    pub configuration_count: usize,
    /// Database file size in bytes (if applicable).
    pub file_size_bytes: Option<u64>,
}
