//! Velo Engine
//!
//! Rule evaluation, dynamic pricing and configuration records for the Velo
//! product configurator.
//!
//! - [`RuleEngine`]: which rules apply to a selection, which options they
//!   disable, and what each option costs after pricing rules.
//! - [`ConfigurationManager`]: completeness, validation messages, summaries
//!   and frozen configuration records.
//! - [`SelectionStore`]: one configuration session, owning the in-progress
//!   selection and a storage backend for saved configurations.
//!
//! The engine and manager never fail. Unknown categories and values price at
//! zero and are never disabled, so callers can probe options speculatively.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use velo_core::SelectionState;
//! use velo_engine::{ConfigurationManager, RuleEngine};
//!
//! let product = velo_config::standard::bike().unwrap();
//! let engine = RuleEngine::for_product(&product);
//!
//! let state = SelectionState::new()
//!     .with("frame-type", "full-suspension")
//!     .with("frame-finish", "matte");
//! assert_eq!(engine.dynamic_price("frame-finish", "matte", &state), Decimal::from(50));
//!
//! let manager = ConfigurationManager::for_product(&product);
//! assert!(!manager.is_complete(&state));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod engine;
mod error;
mod manager;
mod session;

pub use engine::RuleEngine;
pub use error::{StoreError, StoreResult};
pub use manager::{ConfigurationManager, PriceLine, DEFAULT_ID_PREFIX};
pub use session::{SelectionStore, MAX_ID_ATTEMPTS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::RuleEngine;
    pub use crate::error::{StoreError, StoreResult};
    pub use crate::manager::{ConfigurationManager, PriceLine};
    pub use crate::session::SelectionStore;
}
