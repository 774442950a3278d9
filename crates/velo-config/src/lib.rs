//! Velo Configuration Layer
//!
//! Settings and product definition loading for the Velo configurator.
//!
//! Product definitions (catalog plus rules) are plain JSON data, so a
//! deployment can swap products without touching engine code. Every
//! definition goes through a validation pass on load.
//!
//! # Example
//!
//! ```rust
//! use velo_config::{ProductLoader, Settings};
//!
//! let settings = Settings::default();
//! let product = ProductLoader::from_settings(&settings).load(&settings).unwrap();
//! assert_eq!(product.catalog.currency, "EUR");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod loader;
mod settings;
pub mod standard;

pub use error::{ConfigError, ConfigResult};
pub use loader::ProductLoader;
pub use settings::Settings;
