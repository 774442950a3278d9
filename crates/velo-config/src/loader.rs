//! Product definition loading and load-time validation.

use std::path::Path;

use tracing::{debug, info, warn};
use velo_core::{ProductDefinition, Validate};

use crate::error::{ConfigError, ConfigResult};
use crate::settings::Settings;
use crate::standard;

/// Loads product definitions and runs the validation pass over them.
///
/// Validation rejects duplicate ids, malformed ids and self-targeting
/// compatibility rules. Rules that reference unknown categories or values are
/// inert rather than wrong, so they are logged, and only rejected in strict
/// mode.
#[derive(Debug, Clone, Default)]
pub struct ProductLoader {
    strict: bool,
    currency: Option<String>,
}

impl ProductLoader {
    /// Creates a lenient loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader configured from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            strict: settings.strict,
            currency: settings.currency.clone(),
        }
    }

    /// Builder method to enable strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder method to override the product currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Parses and validates a JSON product definition.
    pub fn load_str(&self, json: &str) -> ConfigResult<ProductDefinition> {
        let product = ProductDefinition::from_json_str(json)
            .map_err(|e| ConfigError::Product(e.to_string()))?;
        self.check(product)
    }

    /// Reads, parses and validates a JSON product definition file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> ConfigResult<ProductDefinition> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading product definition");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&content)
    }

    /// Loads the product named by the settings, or the built-in bicycle.
    pub fn load(&self, settings: &Settings) -> ConfigResult<ProductDefinition> {
        match &settings.product_path {
            Some(path) => self.load_file(path),
            None => self.check(standard::bike()?),
        }
    }

    /// Runs the validation pass over an already parsed definition.
    pub fn check(&self, mut product: ProductDefinition) -> ConfigResult<ProductDefinition> {
        let errors = product.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        let dangling = product.dangling_references();
        if !dangling.is_empty() {
            if self.strict {
                return Err(ConfigError::DanglingReferences(dangling));
            }
            for reference in &dangling {
                warn!(product = %product.name, "{}", reference);
            }
        }

        if let Some(currency) = &self.currency {
            product.catalog.currency = currency.clone();
        }

        info!(
            product = %product.name,
            categories = product.catalog.len(),
            rules = product.rules.len(),
            "Loaded product definition"
        );
        Ok(product)
    }
}
