//! Built-in product definitions.

use velo_core::ProductDefinition;

use crate::error::{ConfigError, ConfigResult};

const BIKE_JSON: &str = include_str!("../data/bike.json");

/// The built-in custom bicycle: six categories and five business rules.
///
/// Returned unvalidated; pass it through [`crate::ProductLoader::check`]
/// before use.
pub fn bike() -> ConfigResult<ProductDefinition> {
    ProductDefinition::from_json_str(BIKE_JSON).map_err(|e| ConfigError::Product(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use velo_core::{RuleKind, Validate};

    #[test]
    fn test_bike_definition() {
        let product = bike().unwrap();
        assert!(product.is_valid());
        assert!(product.dangling_references().is_empty());

        let catalog = &product.catalog;
        assert_eq!(catalog.currency, "EUR");
        assert_eq!(catalog.required_categories().count(), 5);
        assert!(!catalog.category("lights").unwrap().required);
        assert_eq!(catalog.base_price("frame-finish", "matte"), dec!(30));
        assert_eq!(catalog.base_price("wheels", "fat-bike"), dec!(150));

        let pricing: Vec<_> = product.rules.active(Some(RuleKind::Pricing)).collect();
        assert_eq!(pricing.len(), 1);
        assert_eq!(pricing[0].priority, 2);
    }
}
