//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type shared by all bounded contexts.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No events exist for the stream.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// Another writer appended to the stream first.
    #[error("concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The stream that had the conflict.
        aggregate_id: Uuid,
        /// The version the writer loaded.
        expected: i64,
        /// The version found at append time.
        actual: i64,
    },

    /// The command is not allowed in the aggregate's current state.
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage or serialization failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Whether the command may succeed if reloaded and retried.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}
