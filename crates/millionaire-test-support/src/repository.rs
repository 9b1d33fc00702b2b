//! Test repositories — `EventRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use millionaire_core::error::DomainError;
use millionaire_core::repository::{EventRepository, StoredEvent, StreamAppend};
use uuid::Uuid;

/// An in-memory event store with the same optimistic-concurrency and
/// all-or-nothing semantics as the PostgreSQL one. Every successful batch is
/// also recorded so tests can assert on what a handler wrote.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: Mutex<HashMap<Uuid, Vec<StoredEvent>>>,
    appended: Mutex<Vec<(Uuid, i64, Vec<StoredEvent>)>>,
}

impl InMemoryEventRepository {
    /// Create a repository pre-loaded with `events`, grouped by aggregate.
    #[must_use]
    pub fn with_events(events: Vec<StoredEvent>) -> Self {
        let mut streams: HashMap<Uuid, Vec<StoredEvent>> = HashMap::new();
        for event in events {
            streams.entry(event.aggregate_id).or_default().push(event);
        }
        Self {
            streams: Mutex::new(streams),
            appended: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all batches that were appended, in write order,
    /// as `(aggregate_id, expected_version, events)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_batches(&self) -> Vec<(Uuid, i64, Vec<StoredEvent>)> {
        self.appended.lock().unwrap().clone()
    }

    /// Total number of events stored for `aggregate_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stream_len(&self, aggregate_id: Uuid) -> usize {
        self.streams
            .lock()
            .unwrap()
            .get(&aggregate_id)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self
            .streams
            .lock()
            .unwrap()
            .get(&aggregate_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_streams(&self, batches: &[StreamAppend<'_>]) -> Result<(), DomainError> {
        let mut streams = self.streams.lock().unwrap();

        for batch in batches {
            let actual = streams
                .get(&batch.aggregate_id)
                .and_then(|events| events.last())
                .map_or(0, |event| event.sequence_number);
            if actual != batch.expected_version {
                return Err(DomainError::ConcurrencyConflict {
                    aggregate_id: batch.aggregate_id,
                    expected: batch.expected_version,
                    actual,
                });
            }
        }

        let mut appended = self.appended.lock().unwrap();
        for batch in batches {
            streams
                .entry(batch.aggregate_id)
                .or_default()
                .extend_from_slice(batch.events);
            appended.push((
                batch.aggregate_id,
                batch.expected_version,
                batch.events.to_vec(),
            ));
        }
        Ok(())
    }
}

/// An event repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingEventRepository;

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn append_streams(&self, _batches: &[StreamAppend<'_>]) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
