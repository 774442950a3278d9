//! Configuration records, completeness checks and summaries.

use rust_decimal::Decimal;
use uuid::Uuid;
use velo_core::{
    Catalog, CategoryId, Configuration, ConfigurationId, OptionValue, ProductDefinition, RuleSet,
    SelectionState,
};

use crate::engine::RuleEngine;

/// Default prefix of generated configuration ids.
pub const DEFAULT_ID_PREFIX: &str = "MK";

/// Number of base-36 characters after the prefix.
const ID_SUFFIX_LEN: usize = 5;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One selected category with its resolved option and price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLine {
    /// Category id.
    pub category: CategoryId,
    /// Category display name.
    pub name: String,
    /// Selected value.
    pub value: OptionValue,
    /// Option label.
    pub label: String,
    /// Catalog price.
    pub base_price: Decimal,
    /// Price after pricing rules.
    pub price: Decimal,
}

impl PriceLine {
    /// Returns true if pricing rules changed the catalog price.
    pub fn is_modified(&self) -> bool {
        self.base_price != self.price
    }
}

/// Builds and checks configuration records.
///
/// Stateless apart from the id prefix: every method is a pure transform over a
/// selection snapshot.
#[derive(Debug, Clone)]
pub struct ConfigurationManager<'a> {
    engine: RuleEngine<'a>,
    id_prefix: String,
}

impl<'a> ConfigurationManager<'a> {
    /// Creates a manager over a catalog and rule set.
    pub fn new(catalog: &'a Catalog, rules: &'a RuleSet) -> Self {
        Self {
            engine: RuleEngine::new(catalog, rules),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }

    /// Creates a manager over a product definition.
    pub fn for_product(product: &'a ProductDefinition) -> Self {
        Self::new(&product.catalog, &product.rules)
    }

    /// Builder method to set the prefix of generated ids.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Returns the underlying rule engine.
    pub fn engine(&self) -> &RuleEngine<'a> {
        &self.engine
    }

    /// Returns true if every required category has a value.
    pub fn is_complete(&self, state: &SelectionState) -> bool {
        self.engine
            .catalog()
            .required_categories()
            .all(|c| state.is_selected(c.id.as_str()))
    }

    /// Returns the required categories without a value, in catalog order.
    pub fn missing_categories(&self, state: &SelectionState) -> Vec<CategoryId> {
        self.engine
            .catalog()
            .required_categories()
            .filter(|c| !state.is_selected(c.id.as_str()))
            .map(|c| c.id.clone())
            .collect()
    }

    /// Generates a configuration id such as `MK03403`.
    pub fn generate_id(&self) -> ConfigurationId {
        let mut bits = Uuid::new_v4().as_u128();
        let mut id = String::with_capacity(self.id_prefix.len() + ID_SUFFIX_LEN);
        id.push_str(&self.id_prefix);
        for _ in 0..ID_SUFFIX_LEN {
            id.push(char::from(BASE36[(bits % 36) as usize]));
            bits /= 36;
        }
        ConfigurationId::new(id)
    }

    /// Snapshots `state` into a configuration record with a frozen total.
    ///
    /// Completeness is not required; partial selections can be saved.
    pub fn create_configuration(
        &self,
        state: &SelectionState,
        id: Option<ConfigurationId>,
    ) -> Configuration {
        let id = id.unwrap_or_else(|| self.generate_id());
        Configuration::new(id, state.clone(), self.engine.total_price(state))
    }

    /// Returns human-readable problems with `state`. Empty means orderable.
    pub fn validate(&self, state: &SelectionState) -> Vec<String> {
        let missing = self.missing_categories(state);
        if missing.is_empty() {
            return Vec::new();
        }
        let names: Vec<&str> = missing.iter().map(CategoryId::as_str).collect();
        vec![format!("Missing selections: {}", names.join(", "))]
    }

    /// Resolves every selected catalog option, in catalog order.
    ///
    /// Selections the catalog does not know, either by category or by value,
    /// are skipped.
    pub fn price_lines(&self, state: &SelectionState) -> Vec<PriceLine> {
        self.engine
            .catalog()
            .categories
            .iter()
            .filter_map(|category| {
                let value = state.get(category.id.as_str())?;
                let option = category.option(value.as_str())?;
                Some(PriceLine {
                    category: category.id.clone(),
                    name: category.name.clone(),
                    value: value.clone(),
                    label: option.label.clone(),
                    base_price: option.base_price,
                    price: self
                        .engine
                        .dynamic_price(category.id.as_str(), value.as_str(), state),
                })
            })
            .collect()
    }

    /// Renders the selection as one line per selected category plus a total.
    pub fn summary(&self, state: &SelectionState) -> String {
        let currency = &self.engine.catalog().currency;
        let mut lines: Vec<String> = self
            .price_lines(state)
            .into_iter()
            .map(|line| {
                format!(
                    "{}: {} ({} {})",
                    line.name,
                    line.label,
                    line.price.normalize(),
                    currency
                )
            })
            .collect();
        lines.push(format!(
            "Total: {} {}",
            self.engine.total_price(state).normalize(),
            currency
        ));
        lines.join("\n")
    }
}
