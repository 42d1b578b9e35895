//! Error types for storage and mutation entry points

use crate::core::models::EntityId;
use thiserror::Error;

/// Failures raised by a document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a document file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A top-level document required by an entry point does not exist
    #[error("{collection} document '{id}' not found")]
    NotFound {
        /// Collection that was searched
        collection: &'static str,
        /// Requested identity
        id: EntityId,
    },

    /// A writer panicked while holding the store lock
    #[error("store lock poisoned")]
    Poisoned,
}

/// Rejected rating input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatingError {
    /// Ratings must be whole stars between 1 and 5
    #[error("rating must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

/// Errors surfaced by [`AcademyService`](crate::core::AcademyService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Persistence failure, propagated unmodified
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid rating value
    #[error(transparent)]
    Rating(#[from] RatingError),
}
