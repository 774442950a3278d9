//! CLI command implementations.
//!
//! Every command returns `Ok(true)` on success and `Ok(false)` when it ran
//! but the process should exit non-zero.

pub mod catalog;
pub mod check;
pub mod price;
pub mod rules;
pub mod store;
pub mod summary;

pub use catalog::CatalogArgs;
pub use rules::RulesArgs;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::debug;
use velo_config::{ProductLoader, Settings};
use velo_core::{ProductDefinition, SelectionState};
use velo_engine::{ConfigurationManager, RuleEngine, SelectionStore};
use velo_storage::RedbStorage;

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, CliResult};

/// A selection given on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Selected option, repeatable (e.g. -s frame-type=diamond)
    #[arg(short = 's', long = "select", value_name = "CATEGORY=VALUE", value_parser = parse_selection)]
    pub selections: Vec<(String, String)>,
}

impl SelectionArgs {
    /// Builds the selection state. Later arguments win.
    pub fn to_state(&self) -> SelectionState {
        self.selections.iter().cloned().collect()
    }
}

/// A saved configuration id.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Configuration id (e.g. MK03403)
    pub id: String,
}

/// Parses `category=value`.
pub fn parse_selection(s: &str) -> CliResult<(String, String)> {
    let (category, value) = s
        .split_once('=')
        .ok_or_else(|| CliError::InvalidSelection(s.to_string()))?;
    let (category, value) = (category.trim(), value.trim());
    if category.is_empty() || value.is_empty() {
        return Err(CliError::InvalidSelection(s.to_string()));
    }
    Ok((category.to_string(), value.to_string()))
}

/// Settings, product and output format shared by every command.
pub struct Context {
    pub settings: Settings,
    pub product: ProductDefinition,
    pub format: OutputFormat,
}

impl Context {
    /// Resolves settings and loads the product named by the command line.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.settings {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(path) = &cli.product {
            settings.product_path = Some(path.clone());
        }
        if let Some(path) = &cli.store {
            settings.storage_path = Some(path.clone());
        }

        let product = ProductLoader::from_settings(&settings).load(&settings)?;
        Ok(Self {
            settings,
            product,
            format: cli.format,
        })
    }

    /// Currency code of the product.
    pub fn currency(&self) -> &str {
        &self.product.catalog.currency
    }

    pub fn engine(&self) -> RuleEngine<'_> {
        RuleEngine::for_product(&self.product)
    }

    pub fn manager(&self) -> ConfigurationManager<'_> {
        ConfigurationManager::for_product(&self.product)
            .with_id_prefix(self.settings.id_prefix.as_str())
    }

    /// Opens the saved configuration database.
    pub fn open_store(&self) -> Result<SelectionStore<RedbStorage>> {
        let path = self.settings.resolve_storage_path()?;
        debug!(path = %path.display(), "Opening configuration store");
        let storage = RedbStorage::open(&path)
            .with_context(|| format!("Failed to open configuration store {}", path.display()))?;
        Ok(SelectionStore::new(self.product.clone(), storage)
            .with_id_prefix(self.settings.id_prefix.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("frame-type=diamond").unwrap(),
            ("frame-type".to_string(), "diamond".to_string())
        );
        assert_eq!(
            parse_selection("lights = lights led").unwrap(),
            ("lights".to_string(), "lights led".to_string())
        );
        assert!(parse_selection("frame-type").is_err());
        assert!(parse_selection("=diamond").is_err());
        assert!(parse_selection("frame-type=").is_err());
    }

    #[test]
    fn test_later_selection_wins() {
        let args = SelectionArgs {
            selections: vec![
                ("wheels".to_string(), "road".to_string()),
                ("wheels".to_string(), "mountain".to_string()),
            ],
        };
        assert_eq!(
            args.to_state().get("wheels").map(|v| v.as_str()),
            Some("mountain")
        );
    }
}
