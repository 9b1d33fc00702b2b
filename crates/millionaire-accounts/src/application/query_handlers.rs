//! Query handlers for player accounts.

use millionaire_core::aggregate::AggregateRoot;
use millionaire_core::error::DomainError;
use millionaire_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::load_account;

/// Read-only view of a player account.
#[derive(Debug, Serialize)]
pub struct AccountView {
    /// The player identifier.
    pub player_id: Uuid,
    /// Display name.
    pub name: String,
    /// Money won so far.
    pub balance: u64,
    /// Game currently in progress, if any.
    pub active_game_id: Option<Uuid>,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves a player account by id.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_account_by_id(
    player_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<AccountView, DomainError> {
    let account = load_account(player_id, repo).await?;
    Ok(AccountView {
        player_id,
        name: account.name.clone(),
        balance: account.balance(),
        active_game_id: account.active_game(),
        version: account.version(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use millionaire_core::error::DomainError;
    use uuid::Uuid;

    use crate::application::command_handlers::handle_open_account;
    use crate::application::query_handlers::get_account_by_id;
    use crate::domain::commands::OpenAccount;
    use millionaire_test_support::{FixedClock, InMemoryEventRepository};

    #[tokio::test]
    async fn test_get_account_by_id_returns_view() {
        // Arrange
        let player_id = Uuid::new_v4();
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let repo = InMemoryEventRepository::default();
        let command = OpenAccount {
            correlation_id: Uuid::new_v4(),
            player_id,
            name: "Vasya".to_owned(),
        };
        handle_open_account(&command, &clock, &repo).await.unwrap();

        // Act
        let view = get_account_by_id(player_id, &repo).await.unwrap();

        // Assert
        assert_eq!(view.player_id, player_id);
        assert_eq!(view.name, "Vasya");
        assert_eq!(view.balance, 0);
        assert_eq!(view.active_game_id, None);
        assert_eq!(view.version, 1);
    }

    #[tokio::test]
    async fn test_get_account_by_id_returns_not_found_when_no_events() {
        let player_id = Uuid::new_v4();
        let repo = InMemoryEventRepository::default();

        let result = get_account_by_id(player_id, &repo).await;

        match result {
            Err(DomainError::AggregateNotFound(id)) => assert_eq!(id, player_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }
}
