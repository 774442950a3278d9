//! Velo Core
//!
//! Data model for the Velo product configurator: the catalog of categories
//! and options, declarative business rules, selection state, and saved
//! configuration records.
//!
//! Everything here is plain data. Rule evaluation and pricing live in
//! `velo-engine`; loading and validating product files lives in
//! `velo-config`.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use velo_core::prelude::*;
//!
//! let catalog = Catalog::new().with_category(
//!     Category::new("wheels", "Wheels")
//!         .required()
//!         .with_option(ProductOption::new("road", "Road wheels", Decimal::from(80))),
//! );
//!
//! let rules = RuleSet::new().with_rule(
//!     Rule::compatibility("no-red", "No red", vec![DisableOptions::new("rim-color", ["red"])])
//!         .when("wheels", ["fat-bike"]),
//! );
//!
//! let product = ProductDefinition::new("bike", catalog, rules);
//! assert!(product.is_valid());
//!
//! let state = SelectionState::new().with("wheels", "road");
//! assert!(!product.rules.all()[0].matches(&state));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod catalog;
mod configuration;
mod error;
mod ids;
mod product;
mod rules;
mod selection;

pub use catalog::{Catalog, Category, ProductOption};
pub use configuration::Configuration;
pub use error::{CoreError, CoreResult, Validate, ValidationError};
pub use ids::{CategoryId, ConfigurationId, OptionValue, RuleId};
pub use product::ProductDefinition;
pub use rules::{DisableOptions, PriceModification, PriceOp, Rule, RuleEffect, RuleKind, RuleSet};
pub use selection::SelectionState;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::{Catalog, Category, ProductOption};
    pub use crate::configuration::Configuration;
    pub use crate::error::{CoreError, CoreResult, Validate};
    pub use crate::ids::{CategoryId, ConfigurationId, OptionValue, RuleId};
    pub use crate::product::ProductDefinition;
    pub use crate::rules::{
        DisableOptions, PriceModification, PriceOp, Rule, RuleEffect, RuleKind, RuleSet,
    };
    pub use crate::selection::SelectionState;
}
