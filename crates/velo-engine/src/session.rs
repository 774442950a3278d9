//! The in-progress selection of one configuration session.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use velo_core::{
    CategoryId, Configuration, ConfigurationId, OptionValue, ProductDefinition, SelectionState,
};
use velo_storage::{StorageAdapter, StorageError};

use crate::engine::RuleEngine;
use crate::error::{StoreError, StoreResult};
use crate::manager::{ConfigurationManager, DEFAULT_ID_PREFIX};

/// Id generation attempts before giving up on a save.
pub const MAX_ID_ATTEMPTS: u32 = 8;

/// Owns the current selection, the product and the saved configurations.
///
/// Mutations take `&mut self`, so a store shared between threads has to be
/// wrapped in a lock by its owner. Only saved configurations go to the
/// storage backend; the current selection is lost when the store is dropped.
///
/// # Example
///
/// ```rust
/// use velo_engine::SelectionStore;
/// use velo_storage::InMemoryStorage;
///
/// let product = velo_config::standard::bike().unwrap();
/// let mut store = SelectionStore::new(product, InMemoryStorage::new());
///
/// store.update_component("frame-type", Some("diamond".into()));
/// assert!(store.is_option_disabled("wheels", "mountain"));
///
/// let id = store.save_configuration().unwrap();
/// store.reset_configuration();
/// assert!(store.load_configuration(id.as_str()).unwrap());
/// ```
pub struct SelectionStore<S: StorageAdapter> {
    product: ProductDefinition,
    storage: S,
    id_prefix: String,
    current: SelectionState,
}

impl<S: StorageAdapter> SelectionStore<S> {
    /// Creates a store with an empty selection.
    pub fn new(product: ProductDefinition, storage: S) -> Self {
        Self {
            product,
            storage,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            current: SelectionState::new(),
        }
    }

    /// Builder method to set the prefix of generated ids.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Returns the product definition.
    pub fn product(&self) -> &ProductDefinition {
        &self.product
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a rule engine over the product.
    pub fn engine(&self) -> RuleEngine<'_> {
        RuleEngine::for_product(&self.product)
    }

    /// Returns a configuration manager over the product.
    pub fn manager(&self) -> ConfigurationManager<'_> {
        ConfigurationManager::for_product(&self.product).with_id_prefix(self.id_prefix.as_str())
    }

    /// Returns the current selection.
    pub fn current(&self) -> &SelectionState {
        &self.current
    }

    /// Sets or clears one category of the current selection.
    pub fn update_component(&mut self, category: impl Into<CategoryId>, value: Option<OptionValue>) {
        let category = category.into();
        debug!(category = %category, value = ?value.as_ref().map(OptionValue::as_str), "Updating selection");
        self.current.update(category, value);
    }

    /// Clears the current selection.
    pub fn reset_configuration(&mut self) {
        self.current = SelectionState::new();
    }

    /// Total price of the current selection.
    pub fn calculate_price(&self) -> Decimal {
        self.engine().total_price(&self.current)
    }

    /// Price of an option given the current selection.
    pub fn dynamic_price(&self, category: &str, value: &str) -> Decimal {
        self.engine().dynamic_price(category, value, &self.current)
    }

    /// Returns true if an option conflicts with the current selection.
    pub fn is_option_disabled(&self, category: &str, value: &str) -> bool {
        self.engine().is_option_disabled(category, value, &self.current)
    }

    /// Values of a category that can be picked given the current selection.
    pub fn available_options(&self, category: &str) -> Vec<OptionValue> {
        self.engine()
            .available_options(category, &self.current)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns true if every required category has a value.
    pub fn is_complete(&self) -> bool {
        self.manager().is_complete(&self.current)
    }

    /// Required categories still missing a value.
    pub fn missing_categories(&self) -> Vec<CategoryId> {
        self.manager().missing_categories(&self.current)
    }

    /// Summary of the current selection.
    pub fn summary(&self) -> String {
        self.manager().summary(&self.current)
    }

    /// Saves the current selection under a fresh id.
    ///
    /// Generated ids that collide with a saved configuration are redrawn up to
    /// [`MAX_ID_ATTEMPTS`] times.
    pub fn save_configuration(&self) -> StoreResult<ConfigurationId> {
        let manager = self.manager();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let configuration = manager.create_configuration(&self.current, None);
            match self.storage.store_configuration(&configuration) {
                Ok(()) => {
                    info!(
                        id = %configuration.id,
                        total = %configuration.total_price,
                        backend = self.storage.backend_name(),
                        "Saved configuration"
                    );
                    return Ok(configuration.id);
                }
                Err(StorageError::DuplicateKey { key, .. }) => {
                    warn!(id = %key, attempt, "Generated configuration id already in use");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Makes a saved configuration the current selection.
    ///
    /// Returns false if no configuration has this id. The restored selection
    /// is evaluated against the current rules from here on.
    pub fn load_configuration(&mut self, id: &str) -> StoreResult<bool> {
        match self.storage.get_configuration(id)? {
            Some(configuration) => {
                info!(id, "Loaded configuration");
                self.current = configuration.selections;
                Ok(true)
            }
            None => {
                debug!(id, "No configuration found");
                Ok(false)
            }
        }
    }

    /// Looks up a saved configuration without touching the current selection.
    pub fn saved_configuration(&self, id: &str) -> StoreResult<Option<Configuration>> {
        Ok(self.storage.get_configuration(id)?)
    }

    /// Lists saved configurations in creation order.
    pub fn saved_configurations(&self) -> StoreResult<Vec<Configuration>> {
        Ok(self.storage.list_configurations()?)
    }

    /// Deletes a saved configuration. Returns true if it existed.
    pub fn delete_configuration(&self, id: &str) -> StoreResult<bool> {
        let deleted = self.storage.delete_configuration(id)?;
        if deleted {
            info!(id, "Deleted configuration");
        }
        Ok(deleted)
    }
}
