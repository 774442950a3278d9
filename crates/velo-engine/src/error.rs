//! Selection store error types.

use thiserror::Error;
use velo_storage::StorageError;

/// Selection store result type.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by [`crate::SelectionStore`].
///
/// Rule evaluation itself never fails; only persistence does.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Every generated id collided with a saved configuration.
    #[error("Could not generate a free configuration id after {attempts} attempts")]
    IdExhausted {
        /// Number of ids tried.
        attempts: u32,
    },
}
