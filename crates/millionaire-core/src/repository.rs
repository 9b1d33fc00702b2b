//! Event repository abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a domain event.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Event type name for deserialization routing.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Sequence number within the aggregate stream.
    pub sequence_number: i64,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Causation ID linking to the causing event/command.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

/// A batch of events destined for one aggregate stream.
#[derive(Debug, Clone, Copy)]
pub struct StreamAppend<'a> {
    /// The aggregate stream to append to.
    pub aggregate_id: Uuid,
    /// The last sequence number the writer observed on that stream.
    pub expected_version: i64,
    /// Events to append, in sequence order.
    pub events: &'a [StoredEvent],
}

/// Repository trait for loading and appending domain events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Load all events for a given aggregate, ordered by sequence number.
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError>;

    /// Append batches to several aggregate streams as one atomic unit.
    ///
    /// Either every batch is written or none is. Each batch is checked against
    /// its `expected_version`; a mismatch on any stream aborts the whole write
    /// with `DomainError::ConcurrencyConflict`.
    async fn append_streams(&self, batches: &[StreamAppend<'_>]) -> Result<(), DomainError>;

    /// Append new events to an aggregate stream with optimistic concurrency.
    /// `expected_version` is the last known sequence number.
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.append_streams(&[StreamAppend {
            aggregate_id,
            expected_version,
            events,
        }])
        .await
    }
}
