//! Aggregate roots for player accounts.

use millionaire_core::aggregate::AggregateRoot;
use millionaire_core::clock::Clock;
use millionaire_core::error::DomainError;
use millionaire_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{AccountEvent, AccountEventKind, AccountOpened, GameSettled, GameStarted};

/// The aggregate root for a player account.
#[derive(Debug)]
pub struct PlayerAccount {
    /// Aggregate identifier (the player id).
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Whether `AccountOpened` has been applied.
    opened: bool,
    /// Display name.
    pub(crate) name: String,
    /// Money credited by finished games.
    pub(crate) balance: u64,
    /// Game currently in progress, if any.
    pub(crate) active_game: Option<Uuid>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<AccountEvent>,
}

impl PlayerAccount {
    /// Creates an empty, unopened account.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            opened: false,
            name: String::new(),
            balance: 0,
            active_game: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Current balance.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// The game in progress, if any.
    #[must_use]
    pub fn active_game(&self) -> Option<Uuid> {
        self.active_game
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: AccountEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = AccountEvent {
            metadata: EventMetadata {
                event_id: Uuid::now_v7(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// The game in progress once the pending events are applied.
    fn pending_active_game(&self) -> Option<Uuid> {
        self.uncommitted_events
            .iter()
            .fold(self.active_game, |active, event| match &event.kind {
                AccountEventKind::GameStarted(payload) => Some(payload.game_id),
                AccountEventKind::GameSettled(_) => None,
                AccountEventKind::AccountOpened(_) => active,
            })
    }

    fn ensure_opened(&self) -> Result<(), DomainError> {
        if self.opened {
            Ok(())
        } else {
            Err(DomainError::AggregateNotFound(self.id))
        }
    }

    /// Opens the account, producing an `AccountOpened` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the account is already open or the
    /// name is blank.
    pub fn open(
        &mut self,
        name: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.opened {
            return Err(DomainError::Validation(format!(
                "account {} is already open",
                self.id
            )));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "player name must not be empty".to_owned(),
            ));
        }

        self.record(
            AccountEventKind::AccountOpened(AccountOpened {
                player_id: self.id,
                name: name.to_owned(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Marks `game_id` as the player's game in progress, producing a
    /// `GameStarted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the account is not open and
    /// `DomainError::Validation` if another game is still in progress.
    pub fn start_game(
        &mut self,
        game_id: Uuid,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_opened()?;
        if let Some(active) = self.pending_active_game() {
            return Err(DomainError::Validation(format!(
                "player {} already has game {active} in progress",
                self.id
            )));
        }

        self.record(
            AccountEventKind::GameStarted(GameStarted {
                player_id: self.id,
                game_id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Closes the active game and credits `payout`, producing a `GameSettled`
    /// event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the account is not open and
    /// `DomainError::Validation` if `game_id` is not the active game.
    pub fn settle_game(
        &mut self,
        game_id: Uuid,
        payout: u64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_opened()?;
        if self.pending_active_game() != Some(game_id) {
            return Err(DomainError::Validation(format!(
                "game {game_id} is not in progress for player {}",
                self.id
            )));
        }

        self.record(
            AccountEventKind::GameSettled(GameSettled {
                player_id: self.id,
                game_id,
                payout,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }
}

impl AggregateRoot for PlayerAccount {
    type Event = AccountEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            AccountEventKind::AccountOpened(payload) => {
                self.opened = true;
                self.name.clone_from(&payload.name);
            }
            AccountEventKind::GameStarted(payload) => {
                self.active_game = Some(payload.game_id);
            }
            AccountEventKind::GameSettled(payload) => {
                self.active_game = None;
                self.balance = self.balance.saturating_add(payload.payout);
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
