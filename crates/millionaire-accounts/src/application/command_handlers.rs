//! Command handlers for player accounts.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.

use millionaire_core::aggregate::AggregateRoot;
use millionaire_core::clock::Clock;
use millionaire_core::command::Command;
use millionaire_core::error::DomainError;
use millionaire_core::event::{DomainEvent, EventMetadata};
use millionaire_core::repository::{EventRepository, StoredEvent};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::aggregates::PlayerAccount;
use crate::domain::commands::OpenAccount;
use crate::domain::events::{AccountEvent, AccountEventKind};

/// Reconstitutes a `PlayerAccount` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub fn reconstitute(
    player_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<PlayerAccount, DomainError> {
    let mut account = PlayerAccount::new(player_id);
    for stored in existing_events {
        let kind: AccountEventKind = serde_json::from_value(stored.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!("event deserialization failed: {e}"))
        })?;
        let event = AccountEvent {
            metadata: EventMetadata::from_stored(stored),
            kind,
        };
        account.apply(&event);
    }
    Ok(account)
}

/// Loads an existing account.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the account has no events, and
/// any error from the repository or from reconstitution.
pub async fn load_account(
    player_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<PlayerAccount, DomainError> {
    let existing_events = repo.load_events(player_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(player_id));
    }
    reconstitute(player_id, &existing_events)
}

/// Handles the `OpenAccount` command: opens a fresh account and persists the
/// resulting event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the account already exists or the name
/// is blank, and `DomainError` from the repository.
#[instrument(skip_all, fields(command = command.command_type(), player_id = %command.target_id()))]
pub async fn handle_open_account(
    command: &OpenAccount,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let existing_events = repo.load_events(command.player_id).await?;
    let mut account = reconstitute(command.player_id, &existing_events)?;

    account.open(&command.name, command.correlation_id, clock)?;

    let stored_events: Vec<StoredEvent> = account
        .uncommitted_events()
        .iter()
        .map(DomainEvent::to_stored_event)
        .collect();

    repo.append_events(command.player_id, account.version(), &stored_events)
        .await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "player account opened"
    );

    Ok(stored_events)
}
