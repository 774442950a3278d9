//! Product catalog: categories, their options and base prices.
//!
//! The catalog is static data. It defines the universe of valid
//! category/value pairs and carries no logic beyond lookups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Validate, ValidationError};
use crate::ids::{CategoryId, OptionValue};

// =============================================================================
// OPTION
// =============================================================================

/// One selectable value within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Value, unique within its category.
    pub value: OptionValue,

    /// Human-readable label.
    pub label: String,

    /// Price before any pricing rule is applied.
    #[serde(rename = "price")]
    pub base_price: Decimal,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductOption {
    /// Creates a new option.
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            base_price,
            description: None,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// One configurable axis of the product (e.g. frame type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier, unique within the catalog.
    pub id: CategoryId,

    /// Display name.
    pub name: String,

    /// Description shown to the user.
    #[serde(default)]
    pub description: String,

    /// Options in display order.
    pub options: Vec<ProductOption>,

    /// Whether a selection is needed for the configuration to be complete.
    #[serde(default)]
    pub required: bool,

    /// UI ordering hint.
    #[serde(default)]
    pub order: i32,
}

impl Category {
    /// Creates a new, optional category without options.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            options: Vec::new(),
            required: false,
            order: 0,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to mark the category as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Builder method to set the display order.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Builder method to append an option.
    pub fn with_option(mut self, option: ProductOption) -> Self {
        self.options.push(option);
        self
    }

    /// Looks up an option by value.
    pub fn option(&self, value: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.value.as_str() == value)
    }
}

// =============================================================================
// CATALOG
// =============================================================================

fn default_currency() -> String {
    "EUR".to_string()
}

/// Ordered set of categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Currency code prices are expressed in.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Categories in declaration order.
    pub categories: Vec<Category>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            categories: Vec::new(),
        }
    }
}

impl Catalog {
    /// Creates an empty catalog priced in EUR.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Builder method to append a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Looks up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id.as_str() == id)
    }

    /// Looks up an option by category id and value.
    pub fn option(&self, category: &str, value: &str) -> Option<&ProductOption> {
        self.category(category).and_then(|c| c.option(value))
    }

    /// Returns the base price of an option, or zero for unknown pairs.
    pub fn base_price(&self, category: &str, value: &str) -> Decimal {
        self.option(category, value)
            .map(|o| o.base_price)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the catalog knows the given pair.
    pub fn contains(&self, category: &str, value: &str) -> bool {
        self.option(category, value).is_some()
    }

    /// Iterates over required categories in declaration order.
    pub fn required_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.required)
    }

    /// Returns categories sorted by their `order` field.
    ///
    /// The sort is stable, so equal orders keep declaration order.
    pub fn sorted_by_order(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self.categories.iter().collect();
        categories.sort_by_key(|c| c.order);
        categories
    }

    /// Returns the number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.currency.trim().is_empty() {
            errors.push(ValidationError::new("currency", "Currency cannot be empty"));
        }

        let mut seen_categories = HashSet::new();
        for (i, category) in self.categories.iter().enumerate() {
            let field = format!("categories[{i}]");

            if category.id.is_malformed() {
                errors.push(ValidationError::new(
                    format!("{field}.id"),
                    format!("Malformed category id '{}'", category.id),
                ));
            }
            if !seen_categories.insert(category.id.as_str()) {
                errors.push(ValidationError::with_rule(
                    format!("{field}.id"),
                    format!("Duplicate category id '{}'", category.id),
                    "unique-category-id",
                ));
            }

            let mut seen_values = HashSet::new();
            for (j, option) in category.options.iter().enumerate() {
                if option.value.is_malformed() {
                    errors.push(ValidationError::new(
                        format!("{field}.options[{j}].value"),
                        format!("Malformed option value '{}'", option.value),
                    ));
                }
                if !seen_values.insert(option.value.as_str()) {
                    errors.push(ValidationError::with_rule(
                        format!("{field}.options[{j}].value"),
                        format!(
                            "Duplicate option value '{}' in category '{}'",
                            option.value, category.id
                        ),
                        "unique-option-value",
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Catalog {
        Catalog::new()
            .with_category(
                Category::new("wheels", "Wheels")
                    .required()
                    .with_order(3)
                    .with_option(ProductOption::new("road", "Road wheels", dec!(80)))
                    .with_option(ProductOption::new("mountain", "Mountain wheels", dec!(120))),
            )
            .with_category(
                Category::new("lights", "Lights")
                    .with_order(1)
                    .with_option(ProductOption::new("lights led", "LED", dec!(3))),
            )
    }

    #[test]
    fn test_lookups() {
        let catalog = sample();
        assert_eq!(catalog.base_price("wheels", "mountain"), dec!(120));
        assert_eq!(catalog.base_price("wheels", "unknown"), Decimal::ZERO);
        assert_eq!(catalog.base_price("nope", "road"), Decimal::ZERO);
        assert!(catalog.contains("lights", "lights led"));
        assert_eq!(catalog.required_categories().count(), 1);
    }

    #[test]
    fn test_sorted_by_order() {
        let catalog = sample();
        let ids: Vec<&str> = catalog.sorted_by_order().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["lights", "wheels"]);
    }

    #[test]
    fn test_duplicate_detection() {
        let catalog = sample()
            .with_category(Category::new("wheels", "Again"))
            .with_category(
                Category::new("rim-color", "Rim")
                    .with_option(ProductOption::new("red", "Red", dec!(25)))
                    .with_option(ProductOption::new("red", "Also red", dec!(25))),
            );

        let errors = catalog.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].rule.as_deref(), Some("unique-category-id"));
        assert_eq!(errors[1].rule.as_deref(), Some("unique-option-value"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "categories": [
                { "id": "chain", "name": "Chain", "options": [
                    { "value": "8-speed", "label": "8-speed chain", "price": 85 }
                ]}
            ]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.currency, "EUR");
        assert!(!catalog.categories[0].required);
        assert_eq!(catalog.base_price("chain", "8-speed"), dec!(85));
    }
}
