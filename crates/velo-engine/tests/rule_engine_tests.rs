//! Integration tests against the built-in bicycle product.
//!
//! These cover the shipped business rules end to end:
//! - Mountain wheels only fit full-suspension frames
//! - Fat-bike wheels and red rims exclude each other
//! - Matte finish costs more on a full-suspension frame
//! - Completeness and snapshot behaviour of configuration records

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use velo_core::prelude::*;
use velo_engine::prelude::*;

fn bike() -> ProductDefinition {
    velo_config::standard::bike().unwrap()
}

fn complete_selection() -> SelectionState {
    SelectionState::new()
        .with("frame-type", "full-suspension")
        .with("frame-finish", "matte")
        .with("wheels", "mountain")
        .with("rim-color", "black")
        .with("chain", "8-speed")
}

// =============================================================================
// COMPATIBILITY
// =============================================================================

#[test]
fn test_diamond_frame_disables_mountain_wheels() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);
    let state = SelectionState::new().with("frame-type", "diamond");

    assert!(engine.is_option_disabled("wheels", "mountain", &state));
    assert!(!engine.is_option_disabled("wheels", "road", &state));
    assert!(!engine.is_option_disabled("wheels", "fat-bike", &state));
}

#[test]
fn test_mountain_wheels_restrict_frame_types() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);
    let state = SelectionState::new().with("wheels", "mountain");

    assert!(engine.is_option_disabled("frame-type", "diamond", &state));
    assert!(engine.is_option_disabled("frame-type", "step-through", &state));
    assert!(!engine.is_option_disabled("frame-type", "full-suspension", &state));
    assert_eq!(
        engine.available_options("frame-type", &state),
        vec![&OptionValue::new("full-suspension")]
    );
}

#[test]
fn test_fat_bike_and_red_rims_exclude_each_other() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);

    let state = SelectionState::new().with("wheels", "fat-bike");
    assert!(engine.is_option_disabled("rim-color", "red", &state));
    assert!(!engine.is_option_disabled("rim-color", "black", &state));

    let state = SelectionState::new().with("rim-color", "red");
    assert!(engine.is_option_disabled("wheels", "fat-bike", &state));
    assert!(!engine.is_option_disabled("wheels", "road", &state));
}

#[test]
fn test_nothing_disabled_without_selections() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);
    let state = SelectionState::new();

    assert!(engine.disabled_options(&state).is_empty());
    assert!(engine.applicable_rules(&state, None).is_empty());
    assert_eq!(engine.available_options("wheels", &state).len(), 3);
}

#[test]
fn test_compatibility_rules_stay_inert_until_both_sides_selected() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);
    let state = SelectionState::new().with("chain", "8-speed");

    assert!(engine
        .applicable_rules(&state, Some(RuleKind::Compatibility))
        .is_empty());
}

#[test]
fn test_disabled_options_lists_every_conflict() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);
    let state = SelectionState::new()
        .with("wheels", "mountain")
        .with("rim-color", "red");

    let disabled: Vec<(&str, &str)> = engine
        .disabled_options(&state)
        .into_iter()
        .map(|(c, v)| (c.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        disabled,
        vec![
            ("frame-type", "diamond"),
            ("frame-type", "step-through"),
            ("wheels", "fat-bike"),
        ]
    );
}

#[test]
fn test_applicable_rules_follow_declaration_order() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);
    let state = complete_selection().with("rim-color", "red");

    let ids: Vec<&str> = engine
        .applicable_rules(&state, None)
        .into_iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "mountain-wheels-frame-compatibility",
            "red-rim-fat-bike-compatibility",
            "matte-finish-pricing",
        ]
    );
}

// =============================================================================
// PRICING
// =============================================================================

#[test]
fn test_matte_finish_surcharge_on_full_suspension() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);

    let state = SelectionState::new()
        .with("frame-type", "full-suspension")
        .with("frame-finish", "matte");
    assert_eq!(engine.dynamic_price("frame-finish", "matte", &state), dec!(50));
    assert!(engine.is_price_modified("frame-finish", "matte", &state));

    let state = SelectionState::new()
        .with("frame-type", "diamond")
        .with("frame-finish", "matte");
    assert_eq!(engine.dynamic_price("frame-finish", "matte", &state), dec!(30));
    assert!(!engine.is_price_modified("frame-finish", "matte", &state));
}

#[test]
fn test_matte_price_probed_before_selecting_finish() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);
    let state = SelectionState::new()
        .with("frame-type", "full-suspension")
        .with("frame-finish", "shiny");

    // The hypothetical selection of matte triggers the surcharge.
    assert_eq!(engine.dynamic_price("frame-finish", "matte", &state), dec!(50));
    assert_eq!(engine.dynamic_price("frame-finish", "shiny", &state), dec!(30));
}

#[test]
fn test_priority_applies_addition_before_multiplication() {
    let mut product = bike();
    product.rules.push(
        Rule::pricing(
            "matte-identity",
            "Matte identity",
            vec![PriceModification::multiply("frame-finish", "matte", dec!(1))],
        )
        .with_priority(1),
    );
    product.rules.push(
        Rule::pricing(
            "matte-double",
            "Matte double",
            vec![PriceModification::multiply("frame-finish", "matte", dec!(2))],
        )
        .with_priority(1),
    );
    let engine = RuleEngine::for_product(&product);
    let state = SelectionState::new().with("frame-type", "full-suspension");

    // (30 + 20) * 1 * 2
    assert_eq!(engine.dynamic_price("frame-finish", "matte", &state), dec!(100));
}

#[test]
fn test_total_price_skips_unselected_categories() {
    let product = bike();
    let engine = RuleEngine::for_product(&product);

    let mut state = complete_selection();
    // 130 + 50 + 120 + 20 + 85
    assert_eq!(engine.total_price(&state), dec!(405));

    state.clear("chain");
    assert_eq!(engine.total_price(&state), dec!(320));

    state.set("lights", "lights led");
    assert_eq!(engine.total_price(&state), dec!(323));

    assert_eq!(engine.total_price(&SelectionState::new()), Decimal::ZERO);
}

// =============================================================================
// CONFIGURATION MANAGER
// =============================================================================

#[test]
fn test_completeness_of_bike_selection() {
    let product = bike();
    let manager = ConfigurationManager::for_product(&product);

    let state = complete_selection();
    assert!(manager.is_complete(&state));
    assert!(manager.missing_categories(&state).is_empty());

    let mut partial = state.clone();
    partial.clear("wheels");
    partial.clear("frame-type");
    assert!(!manager.is_complete(&partial));
    assert_eq!(
        manager.missing_categories(&partial),
        vec![CategoryId::new("frame-type"), CategoryId::new("wheels")]
    );
    assert_eq!(
        manager.validate(&partial),
        vec!["Missing selections: frame-type, wheels".to_string()]
    );
}

#[test]
fn test_snapshots_share_price_and_selections() {
    let product = bike();
    let manager = ConfigurationManager::for_product(&product);
    let state = complete_selection();

    let first = manager.create_configuration(&state, None);
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = manager.create_configuration(&state, None);

    assert_ne!(first.id, second.id);
    assert!(second.created_at > first.created_at);
    assert_eq!(first.total_price, second.total_price);
    assert_eq!(first.selections, second.selections);
}

#[test]
fn test_partial_selection_can_be_snapshotted() {
    let product = bike();
    let manager = ConfigurationManager::for_product(&product);
    let state = SelectionState::new().with("wheels", "road");

    let configuration = manager.create_configuration(&state, None);
    assert_eq!(configuration.total_price, dec!(80));
    assert!(!manager.is_complete(&configuration.selections));
}

#[test]
fn test_bike_summary() {
    let product = bike();
    let manager = ConfigurationManager::for_product(&product);

    assert_eq!(
        manager.summary(&complete_selection()),
        "Frame Type: Full-suspension (130 EUR)\n\
         Frame Finish: Matte (50 EUR)\n\
         Wheels: Mountain wheels (120 EUR)\n\
         Rim Color: Black (20 EUR)\n\
         Chain: 8-speed chain (85 EUR)\n\
         Total: 405 EUR"
    );
}
