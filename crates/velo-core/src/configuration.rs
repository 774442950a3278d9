//! Saved configuration records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::ConfigurationId;
use crate::selection::SelectionState;

/// A persisted configuration.
///
/// `total_price` is frozen when the record is created. Later rule or
/// catalog changes do not alter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Unique identifier.
    pub id: ConfigurationId,

    /// Copy of the selection at save time.
    #[serde(rename = "components")]
    pub selections: SelectionState,

    /// Total price computed at save time.
    pub total_price: Decimal,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Configuration {
    /// Creates a record stamped with the current time.
    pub fn new(id: ConfigurationId, selections: SelectionState, total_price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id,
            selections,
            total_price,
            created_at: now,
            updated_at: now,
        }
    }
}
