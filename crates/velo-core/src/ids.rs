//! Identifier types used across the configurator.
//!
//! All identifiers are thin string newtypes. Construction never fails; the
//! load-time validation pass is responsible for rejecting empty or padded ids.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates a new identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty or has surrounding whitespace.
            pub fn is_malformed(&self) -> bool {
                self.0.is_empty() || self.0.trim() != self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Category identifier (e.g. `frame-type`). Unique within a catalog.
    CategoryId
}

string_id! {
    /// Option value within a category (e.g. `full-suspension`).
    OptionValue
}

string_id! {
    /// Business rule identifier.
    RuleId
}

string_id! {
    /// Saved configuration identifier (e.g. `MK03403`).
    ConfigurationId
}
