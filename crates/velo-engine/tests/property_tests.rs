//! Property-based tests for engine invariants.
//!
//! These tests verify properties that must hold for any selection:
//! - Queries never fail, for known and unknown identifiers alike
//! - An empty selection costs nothing
//! - The total is the sum of the per-category dynamic prices
//! - `missing_categories` is empty exactly when the selection is complete
//! - A disabled option is never listed as available

use proptest::prelude::*;
use rust_decimal::Decimal;
use velo_core::prelude::*;
use velo_engine::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn bike() -> ProductDefinition {
    velo_config::standard::bike().unwrap()
}

/// Category ids from the bike catalog plus a few it does not know.
fn category_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("frame-type".to_string()),
        Just("frame-finish".to_string()),
        Just("wheels".to_string()),
        Just("rim-color".to_string()),
        Just("chain".to_string()),
        Just("lights".to_string()),
        "[a-z]{1,8}",
        Just(String::new()),
    ]
}

/// Option values from the bike catalog plus arbitrary strings.
fn option_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("full-suspension".to_string()),
        Just("diamond".to_string()),
        Just("step-through".to_string()),
        Just("matte".to_string()),
        Just("shiny".to_string()),
        Just("road".to_string()),
        Just("mountain".to_string()),
        Just("fat-bike".to_string()),
        Just("red".to_string()),
        Just("black".to_string()),
        Just("8-speed".to_string()),
        Just("lights led".to_string()),
        "[a-z -]{0,10}",
    ]
}

fn selection() -> impl Strategy<Value = SelectionState> {
    prop::collection::vec((category_id(), prop::option::of(option_value())), 0..8).prop_map(
        |entries| {
            let mut state = SelectionState::new();
            for (category, value) in entries {
                state.update(category, value.map(OptionValue::from));
            }
            state
        },
    )
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_queries_are_total(
        state in selection(),
        category in category_id(),
        value in option_value(),
    ) {
        let product = bike();
        let engine = RuleEngine::for_product(&product);

        let price = engine.dynamic_price(&category, &value, &state);
        let _ = engine.is_option_disabled(&category, &value, &state);
        let _ = engine.available_options(&category, &state);
        let _ = engine.total_price(&state);

        // The bike product only adds to prices.
        prop_assert!(price >= engine.base_price(&category, &value));
    }

    #[test]
    fn prop_unknown_pairs_are_neutral(state in selection(), value in "[A-Z]{3,6}") {
        let product = bike();
        let engine = RuleEngine::for_product(&product);

        prop_assert_eq!(engine.dynamic_price("wheels", &value, &state), Decimal::ZERO);
        prop_assert!(!engine.is_option_disabled("wheels", &value, &state));
        prop_assert_eq!(engine.dynamic_price(&value, "road", &state), Decimal::ZERO);
    }

    #[test]
    fn prop_total_is_sum_of_dynamic_prices(state in selection()) {
        let product = bike();
        let engine = RuleEngine::for_product(&product);

        let sum = state
            .selected()
            .filter(|(c, _)| product.catalog.category(c.as_str()).is_some())
            .map(|(c, v)| engine.dynamic_price(c.as_str(), v.as_str(), &state))
            .fold(Decimal::ZERO, |acc, p| acc + p);
        prop_assert_eq!(engine.total_price(&state), sum);
    }

    #[test]
    fn prop_missing_empty_iff_complete(state in selection()) {
        let product = bike();
        let manager = ConfigurationManager::for_product(&product);

        let missing = manager.missing_categories(&state);
        prop_assert_eq!(missing.is_empty(), manager.is_complete(&state));
        prop_assert_eq!(manager.validate(&state).is_empty(), manager.is_complete(&state));
        for category in &missing {
            prop_assert!(!state.is_selected(category.as_str()));
        }
    }

    #[test]
    fn prop_available_excludes_disabled(state in selection(), category in category_id()) {
        let product = bike();
        let engine = RuleEngine::for_product(&product);

        for value in engine.available_options(&category, &state) {
            prop_assert!(!engine.is_option_disabled(&category, value.as_str(), &state));
        }
    }

    #[test]
    fn prop_snapshot_total_matches_engine(state in selection()) {
        let product = bike();
        let manager = ConfigurationManager::for_product(&product);

        let configuration = manager.create_configuration(&state, None);
        prop_assert_eq!(configuration.total_price, manager.engine().total_price(&state));
        prop_assert_eq!(&configuration.selections, &state);
    }
}

#[test]
fn test_empty_selection_costs_nothing() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);
    assert_eq!(engine.total_price(&SelectionState::new()), Decimal::ZERO);

    let mut all_cleared = SelectionState::new();
    for category in &product.catalog.categories {
        all_cleared.clear(category.id.clone());
    }
    assert_eq!(engine.total_price(&all_cleared), Decimal::ZERO);
}
