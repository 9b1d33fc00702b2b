//! `PostgreSQL` implementation of the `EventRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::debug;
use uuid::Uuid;

use millionaire_core::error::DomainError;
use millionaire_core::repository::{EventRepository, StoredEvent, StreamAppend};

/// Postgres error code for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed event repository.
#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Creates a new `PgEventRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn infrastructure(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("event store: {e}"))
}

fn map_event_row(row: &PgRow) -> Result<StoredEvent, sqlx::Error> {
    Ok(StoredEvent {
        event_id: row.try_get("event_id")?,
        aggregate_id: row.try_get("aggregate_id")?,
        event_type: row.try_get("event_type")?,
        payload: row.try_get("payload")?,
        sequence_number: row.try_get("sequence_number")?,
        correlation_id: row.try_get("correlation_id")?,
        causation_id: row.try_get("causation_id")?,
        occurred_at: row.try_get::<DateTime<Utc>, _>("occurred_at")?,
    })
}

async fn current_version(
    tx: &mut Transaction<'_, Postgres>,
    aggregate_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COALESCE(MAX(sequence_number), 0) FROM domain_events WHERE aggregate_id = $1",
    )
    .bind(aggregate_id)
    .fetch_one(&mut **tx)
    .await
}

/// Appends one batch inside `tx` after checking the stream version.
async fn append_batch(
    tx: &mut Transaction<'_, Postgres>,
    batch: &StreamAppend<'_>,
) -> Result<(), DomainError> {
    // Serialize writers on the same stream for the rest of the transaction.
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
        .bind(batch.aggregate_id)
        .execute(&mut **tx)
        .await
        .map_err(infrastructure)?;

    let actual = current_version(tx, batch.aggregate_id)
        .await
        .map_err(infrastructure)?;
    if actual != batch.expected_version {
        return Err(DomainError::ConcurrencyConflict {
            aggregate_id: batch.aggregate_id,
            expected: batch.expected_version,
            actual,
        });
    }

    for event in batch.events {
        let inserted = sqlx::query(
            r"
            INSERT INTO domain_events
                (event_id, aggregate_id, event_type, payload, sequence_number,
                 correlation_id, causation_id, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(event.event_id)
        .bind(batch.aggregate_id)
        .bind(&event.event_type)
        .bind(&event.payload)
        .bind(event.sequence_number)
        .bind(event.correlation_id)
        .bind(event.causation_id)
        .bind(event.occurred_at)
        .execute(&mut **tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db))
                if db.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                return Err(DomainError::ConcurrencyConflict {
                    aggregate_id: batch.aggregate_id,
                    expected: batch.expected_version,
                    actual: event.sequence_number,
                });
            }
            Err(e) => return Err(infrastructure(e)),
        }
    }
    Ok(())
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let rows = sqlx::query(
            r"
            SELECT event_id, aggregate_id, event_type, payload, sequence_number,
                   correlation_id, causation_id, occurred_at
            FROM domain_events
            WHERE aggregate_id = $1
            ORDER BY sequence_number
            ",
        )
        .bind(aggregate_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;

        rows.iter()
            .map(map_event_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(infrastructure)
    }

    async fn append_streams(&self, batches: &[StreamAppend<'_>]) -> Result<(), DomainError> {
        if batches.iter().all(|batch| batch.events.is_empty()) {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(infrastructure)?;
        for batch in batches {
            append_batch(&mut tx, batch).await?;
        }
        tx.commit().await.map_err(infrastructure)?;

        debug!(streams = batches.len(), "appended event batches");
        Ok(())
    }
}
