//! In-memory user record store.
//!
//! # Data Flow
//! ```text
//! UserService handler
//!     → RecordStore::create (exclusive lock, atomic insert)
//!     → RecordStore::get (shared lock, clone of the shared handle)
//!     → RecordStore::enumerate (shared lock held by the returned Snapshot)
//! ```
//!
//! # Design Decisions
//! - One reader/writer lock guards the whole map; readers never block readers
//! - Records are handed out as `Arc<Record>` and never mutated after insert
//! - The store never shrinks and is not persisted

pub mod memory;
pub mod record;

pub use memory::{RecordStore, Snapshot};
pub use record::Record;

use thiserror::Error;

/// Errors produced by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// No record exists for the identifier.
    #[error("user with id {0} not found")]
    NotFound(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
