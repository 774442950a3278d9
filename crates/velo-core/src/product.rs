//! Product definitions: a catalog together with its rule set.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreResult, Validate, ValidationError};
use crate::rules::RuleSet;

/// The unit a deployment swaps to configure a different product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDefinition {
    /// Product name.
    #[serde(default)]
    pub name: String,

    /// Categories and options.
    #[serde(flatten)]
    pub catalog: Catalog,

    /// Business rules in declaration order.
    #[serde(default)]
    pub rules: RuleSet,
}

impl ProductDefinition {
    /// Creates a product definition.
    pub fn new(name: impl Into<String>, catalog: Catalog, rules: RuleSet) -> Self {
        Self {
            name: name.into(),
            catalog,
            rules,
        }
    }

    /// Parses a product definition from JSON without validating it.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the definition to pretty JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lists rule references to categories or values the catalog does not know.
    ///
    /// Such references are legal: the affected conditions never match and the
    /// affected effects never find a target. They are usually typos, so
    /// loaders report them.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for rule in self.rules.all() {
            for (category, values) in &rule.conditions {
                match self.catalog.category(category.as_str()) {
                    None => warnings.push(format!(
                        "rule '{}' conditions on unknown category '{}'",
                        rule.id, category
                    )),
                    Some(c) => {
                        for value in values.iter().filter(|v| c.option(v.as_str()).is_none()) {
                            warnings.push(format!(
                                "rule '{}' conditions on unknown option '{}={}'",
                                rule.id, category, value
                            ));
                        }
                    }
                }
            }

            for (category, value) in rule.effect.targets() {
                if !self.catalog.contains(category.as_str(), value.as_str()) {
                    warnings.push(format!(
                        "rule '{}' targets unknown option '{}={}'",
                        rule.id, category, value
                    ));
                }
            }
        }

        warnings
    }
}

impl Validate for ProductDefinition {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.catalog.validate();
        errors.extend(self.rules.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ProductOption};
    use crate::rules::{DisableOptions, Rule};
    use rust_decimal_macros::dec;

    fn product() -> ProductDefinition {
        let catalog = Catalog::new().with_category(
            Category::new("wheels", "Wheels")
                .with_option(ProductOption::new("road", "Road", dec!(80))),
        );
        let rules = RuleSet::new().with_rule(
            Rule::compatibility(
                "typo",
                "Typo",
                vec![DisableOptions::new("rim-colour", ["red"])],
            )
            .when("wheels", ["road", "gravel"]),
        );
        ProductDefinition::new("bike", catalog, rules)
    }

    #[test]
    fn test_dangling_references() {
        let warnings = product().dangling_references();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("wheels=gravel"));
        assert!(warnings[1].contains("rim-colour=red"));
    }

    #[test]
    fn test_json_round_trip_flattens_catalog() {
        let json = product().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("categories").is_some());
        assert_eq!(value["currency"], "EUR");

        let parsed = ProductDefinition::from_json_str(&json).unwrap();
        assert_eq!(parsed.rules.len(), 1);
        assert!(parsed.is_valid());
    }
}
