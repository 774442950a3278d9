//! Rule evaluation and dynamic pricing.
//!
//! Every query is a pure function of the catalog, the rule set and a
//! caller-supplied selection. None of them fail: unknown categories and
//! values simply price at zero and are never disabled.

use std::cmp::Reverse;

use rust_decimal::Decimal;
use tracing::{debug, trace};
use velo_core::{
    Catalog, CategoryId, OptionValue, ProductDefinition, Rule, RuleKind, RuleSet, SelectionState,
};

/// Evaluates business rules against selection states.
///
/// The engine borrows its catalog and rules and never mutates them, so it is
/// cheap to construct per query.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use velo_core::prelude::*;
/// use velo_engine::RuleEngine;
///
/// let catalog = Catalog::new().with_category(
///     Category::new("finish", "Finish")
///         .with_option(ProductOption::new("matte", "Matte", Decimal::from(30))),
/// );
/// let rules = RuleSet::new().with_rule(
///     Rule::pricing(
///         "matte-surcharge",
///         "Matte surcharge",
///         vec![PriceModification::add("finish", "matte", Decimal::from(20))],
///     )
///     .when("frame", ["full-suspension"]),
/// );
///
/// let engine = RuleEngine::new(&catalog, &rules);
/// let state = SelectionState::new().with("frame", "full-suspension");
/// assert_eq!(engine.dynamic_price("finish", "matte", &state), Decimal::from(50));
/// assert_eq!(engine.dynamic_price("finish", "matte", &SelectionState::new()), Decimal::from(30));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    catalog: &'a Catalog,
    rules: &'a RuleSet,
}

impl<'a> RuleEngine<'a> {
    /// Creates an engine over a catalog and rule set.
    pub fn new(catalog: &'a Catalog, rules: &'a RuleSet) -> Self {
        Self { catalog, rules }
    }

    /// Creates an engine over a product definition.
    pub fn for_product(product: &'a ProductDefinition) -> Self {
        Self::new(&product.catalog, &product.rules)
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Returns the rule set.
    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    /// Returns the active rules whose conditions hold in `state`.
    ///
    /// Output follows declaration order; no sorting is applied.
    pub fn applicable_rules(&self, state: &SelectionState, kind: Option<RuleKind>) -> Vec<&'a Rule> {
        self.rules
            .active(kind)
            .filter(|rule| {
                let matched = rule.matches(state);
                trace!(rule = %rule.id, matched, "Evaluated rule");
                matched
            })
            .collect()
    }

    /// Returns the compatibility rules that would disable `value` in `category`.
    ///
    /// Rules are evaluated against `state` with `category` set to `value`.
    pub fn disabling_rules(&self, category: &str, value: &str, state: &SelectionState) -> Vec<&'a Rule> {
        let hypothetical = state.with_override(category, value);
        self.applicable_rules(&hypothetical, Some(RuleKind::Compatibility))
            .into_iter()
            .filter(|rule| rule.effect.disables(category, value))
            .collect()
    }

    /// Returns true if picking `value` for `category` would conflict with the
    /// other selections in `state`.
    pub fn is_option_disabled(&self, category: &str, value: &str, state: &SelectionState) -> bool {
        let hypothetical = state.with_override(category, value);
        self.rules
            .active(Some(RuleKind::Compatibility))
            .any(|rule| rule.matches(&hypothetical) && rule.effect.disables(category, value))
    }

    /// Returns the catalog price of an option, or zero if it is unknown.
    pub fn base_price(&self, category: &str, value: &str) -> Decimal {
        self.catalog.base_price(category, value)
    }

    /// Returns the price of `value` in `category` after pricing rules.
    ///
    /// Applicable pricing rules are evaluated against `state` with `category`
    /// set to `value`, sorted by descending priority (ties keep declaration
    /// order), and applied left to right to the running price.
    pub fn dynamic_price(&self, category: &str, value: &str, state: &SelectionState) -> Decimal {
        let base = self.base_price(category, value);
        let hypothetical = state.with_override(category, value);

        let mut rules = self.applicable_rules(&hypothetical, Some(RuleKind::Pricing));
        rules.sort_by_key(|rule| Reverse(rule.priority));

        rules.iter().fold(base, |price, rule| {
            match rule.effect.modification_for(category, value) {
                Some(modification) => {
                    let next = modification.op.apply(price, modification.modifier);
                    debug!(
                        rule = %rule.id,
                        category,
                        value,
                        %price,
                        %next,
                        "Applied price modification"
                    );
                    next
                }
                None => price,
            }
        })
    }

    /// Returns true if pricing rules change the price of an option in `state`.
    pub fn is_price_modified(&self, category: &str, value: &str, state: &SelectionState) -> bool {
        self.base_price(category, value) != self.dynamic_price(category, value, state)
    }

    /// Sums the dynamic price of every selected catalog category.
    ///
    /// Unselected categories contribute nothing, and neither do selections of
    /// categories the catalog does not know, even when a rule targets them.
    pub fn total_price(&self, state: &SelectionState) -> Decimal {
        self.catalog
            .categories
            .iter()
            .filter_map(|c| state.get(c.id.as_str()).map(|value| (c.id.as_str(), value)))
            .map(|(category, value)| self.dynamic_price(category, value.as_str(), state))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Returns the values of `category` that are not disabled in `state`,
    /// in catalog order. Unknown categories yield nothing.
    pub fn available_options(&self, category: &str, state: &SelectionState) -> Vec<&'a OptionValue> {
        self.catalog
            .category(category)
            .map(|c| {
                c.options
                    .iter()
                    .map(|o| &o.value)
                    .filter(|value| !self.is_option_disabled(category, value.as_str(), state))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns every catalog option that is disabled in `state`.
    pub fn disabled_options(&self, state: &SelectionState) -> Vec<(&'a CategoryId, &'a OptionValue)> {
        self.catalog
            .categories
            .iter()
            .flat_map(|c| c.options.iter().map(move |o| (&c.id, &o.value)))
            .filter(|(category, value)| {
                self.is_option_disabled(category.as_str(), value.as_str(), state)
            })
            .collect()
    }
}
