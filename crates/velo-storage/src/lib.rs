//! Velo Storage Layer
//!
//! Persistence for saved configurations. Only saved [`velo_core::Configuration`]
//! records are stored; the selection a user is still working on lives in
//! memory and is lost on restart.
//!
//! # Storage Backends
//!
//! ## RedbStorage (Default)
//!
//! Uses [redb](https://crates.io/crates/redb), a pure-Rust embedded database
//! with ACID transactions. Suitable for single-process applications.
//!
//! ## InMemoryStorage
//!
//! A simple in-memory implementation for testing and development.
//! Data is not persisted across restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod adapter;
mod error;
mod memory;
mod redb;

pub use adapter::{StorageAdapter, StorageStats};
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStorage;
pub use self::redb::RedbStorage;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adapter::{StorageAdapter, StorageStats};
    pub use crate::error::{StorageError, StorageResult};
    pub use crate::memory::InMemoryStorage;
    pub use crate::redb::RedbStorage;
}
