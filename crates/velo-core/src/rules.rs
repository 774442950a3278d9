//! Declarative business rules.
//!
//! A rule pairs a set of conditions over the selection state with an effect.
//! The effect is a tagged variant: compatibility rules disable options,
//! pricing rules modify option prices. The rule's kind is derived from the
//! effect, so the two can never disagree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::{Validate, ValidationError};
use crate::ids::{CategoryId, OptionValue, RuleId};
use crate::selection::SelectionState;

// =============================================================================
// RULE KIND
// =============================================================================

/// The two families of business rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Restricts which options may be combined.
    Compatibility,
    /// Adjusts option prices.
    Pricing,
}

impl RuleKind {
    /// Returns the string identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compatibility => "compatibility",
            Self::Pricing => "pricing",
        }
    }

    /// Parses a rule kind from its string identifier.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compatibility" => Some(Self::Compatibility),
            "pricing" => Some(Self::Pricing),
            _ => None,
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// EFFECTS
// =============================================================================

/// Options of one category disabled by a compatibility rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisableOptions {
    /// Category whose options are disabled.
    pub category: CategoryId,
    /// Disabled values.
    pub values: BTreeSet<OptionValue>,
}

impl DisableOptions {
    /// Creates a new disable entry.
    pub fn new<I, V>(category: impl Into<CategoryId>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<OptionValue>,
    {
        Self {
            category: category.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if this entry disables the given pair.
    pub fn disables(&self, category: &str, value: &str) -> bool {
        self.category.as_str() == category && self.values.contains(value)
    }
}

/// How a price modifier combines with the running price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceOp {
    /// `price += modifier`
    Add,
    /// `price *= modifier`
    Multiply,
}

impl PriceOp {
    /// Applies the operation to a running price.
    ///
    /// Saturates at the decimal bounds instead of overflowing.
    pub fn apply(self, price: Decimal, modifier: Decimal) -> Decimal {
        match self {
            Self::Add => price.saturating_add(modifier),
            Self::Multiply => price.saturating_mul(modifier),
        }
    }
}

/// A price adjustment for one option made by a pricing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceModification {
    /// Category of the repriced option.
    pub category: CategoryId,
    /// Value of the repriced option.
    pub value: OptionValue,
    /// Modifier amount or factor.
    pub modifier: Decimal,
    /// How the modifier is applied.
    pub op: PriceOp,
}

impl PriceModification {
    /// Creates an additive modification.
    pub fn add(category: impl Into<CategoryId>, value: impl Into<OptionValue>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
            modifier: amount,
            op: PriceOp::Add,
        }
    }

    /// Creates a multiplicative modification.
    pub fn multiply(
        category: impl Into<CategoryId>,
        value: impl Into<OptionValue>,
        factor: Decimal,
    ) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
            modifier: factor,
            op: PriceOp::Multiply,
        }
    }

    /// Returns true if this modification targets the given pair.
    pub fn targets(&self, category: &str, value: &str) -> bool {
        self.category.as_str() == category && self.value.as_str() == value
    }
}

/// The effect of a rule, discriminated by rule kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleEffect {
    /// Disables options.
    Compatibility {
        /// Disabled options, per category.
        disable: Vec<DisableOptions>,
    },
    /// Modifies option prices.
    Pricing {
        /// Price modifications in declaration order.
        modifications: Vec<PriceModification>,
    },
}

impl RuleEffect {
    /// Returns the kind of rule this effect belongs to.
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Compatibility { .. } => RuleKind::Compatibility,
            Self::Pricing { .. } => RuleKind::Pricing,
        }
    }

    /// Returns true if this effect disables the given pair.
    pub fn disables(&self, category: &str, value: &str) -> bool {
        match self {
            Self::Compatibility { disable } => disable.iter().any(|d| d.disables(category, value)),
            Self::Pricing { .. } => false,
        }
    }

    /// Returns the first modification targeting the given pair, if any.
    pub fn modification_for(&self, category: &str, value: &str) -> Option<&PriceModification> {
        match self {
            Self::Pricing { modifications } => {
                modifications.iter().find(|m| m.targets(category, value))
            }
            Self::Compatibility { .. } => None,
        }
    }

    /// Iterates over every `(category, value)` pair the effect touches.
    pub fn targets(&self) -> Box<dyn Iterator<Item = (&CategoryId, &OptionValue)> + '_> {
        match self {
            Self::Compatibility { disable } => Box::new(
                disable
                    .iter()
                    .flat_map(|d| d.values.iter().map(move |v| (&d.category, v))),
            ),
            Self::Pricing { modifications } => {
                Box::new(modifications.iter().map(|m| (&m.category, &m.value)))
            }
        }
    }
}

// =============================================================================
// RULE
// =============================================================================

fn default_true() -> bool {
    true
}

/// A declarative business rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier.
    pub id: RuleId,

    /// Human-readable name.
    pub name: String,

    /// Longer description.
    #[serde(default)]
    pub description: String,

    /// Allowed values per category. Every entry must hold for the rule to match.
    #[serde(default)]
    pub conditions: BTreeMap<CategoryId, BTreeSet<OptionValue>>,

    /// What the rule does when it matches.
    pub effect: RuleEffect,

    /// Inactive rules are never applicable.
    #[serde(default = "default_true")]
    pub active: bool,

    /// Higher priority pricing rules apply first.
    #[serde(default)]
    pub priority: i32,

    /// When the rule was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the rule was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Rule {
    fn with_effect(id: impl Into<RuleId>, name: impl Into<String>, effect: RuleEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            conditions: BTreeMap::new(),
            effect,
            active: true,
            priority: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Creates an unconditional compatibility rule.
    pub fn compatibility(
        id: impl Into<RuleId>,
        name: impl Into<String>,
        disable: Vec<DisableOptions>,
    ) -> Self {
        Self::with_effect(id, name, RuleEffect::Compatibility { disable })
    }

    /// Creates an unconditional pricing rule.
    pub fn pricing(
        id: impl Into<RuleId>,
        name: impl Into<String>,
        modifications: Vec<PriceModification>,
    ) -> Self {
        Self::with_effect(id, name, RuleEffect::Pricing { modifications })
    }

    /// Builder method to add a condition.
    pub fn when<I, V>(mut self, category: impl Into<CategoryId>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<OptionValue>,
    {
        self.conditions
            .entry(category.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builder method to deactivate the rule.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Returns the kind of this rule.
    pub fn kind(&self) -> RuleKind {
        self.effect.kind()
    }

    /// Returns true if every condition holds in `state`.
    ///
    /// A condition holds when the state has a value for the category and the
    /// value is one of the allowed ones. Empty conditions always match.
    pub fn matches(&self, state: &SelectionState) -> bool {
        self.conditions.iter().all(|(category, allowed)| {
            state
                .get(category.as_str())
                .is_some_and(|value| allowed.contains(value))
        })
    }

    /// Returns true if this is a compatibility rule that disables an option
    /// its own conditions select.
    ///
    /// Such a rule matches the hypothetical state of the very option it
    /// disables. Conditioning on a category while disabling other values of
    /// it is fine.
    pub fn is_self_targeting(&self) -> bool {
        match &self.effect {
            RuleEffect::Compatibility { disable } => disable.iter().any(|d| {
                self.conditions
                    .get(&d.category)
                    .is_some_and(|allowed| !allowed.is_disjoint(&d.values))
            }),
            RuleEffect::Pricing { .. } => false,
        }
    }
}

// =============================================================================
// RULE SET
// =============================================================================

/// Ordered list of rules. Declaration order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a new empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Returns all rules in declaration order.
    pub fn all(&self) -> &[Rule] {
        &self.rules
    }

    /// Iterates over active rules, optionally restricted to one kind.
    pub fn active(&self, kind: Option<RuleKind>) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(move |r| r.active && kind.map_or(true, |k| r.kind() == k))
    }

    /// Looks up a rule by id.
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id.as_str() == id)
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl Validate for RuleSet {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (i, rule) in self.rules.iter().enumerate() {
            let field = format!("rules[{i}]");

            if rule.id.is_malformed() {
                errors.push(ValidationError::new(
                    format!("{field}.id"),
                    format!("Malformed rule id '{}'", rule.id),
                ));
            }
            if !seen.insert(rule.id.as_str()) {
                errors.push(ValidationError::with_rule(
                    format!("{field}.id"),
                    format!("Duplicate rule id '{}'", rule.id),
                    "unique-rule-id",
                ));
            }
            for (category, values) in &rule.conditions {
                if category.is_malformed() {
                    errors.push(ValidationError::new(
                        format!("{field}.conditions"),
                        format!("Malformed category id '{category}'"),
                    ));
                }
                if values.is_empty() {
                    errors.push(ValidationError::new(
                        format!("{field}.conditions.{category}"),
                        "Condition lists no allowed values and can never match",
                    ));
                }
            }
            if rule.is_self_targeting() {
                errors.push(ValidationError::with_rule(
                    format!("{field}.effect"),
                    format!(
                        "Compatibility rule '{}' disables an option its own conditions select",
                        rule.id
                    ),
                    "no-self-targeting",
                ));
            }
        }

        errors
    }
}
