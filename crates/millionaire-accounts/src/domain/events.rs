//! Domain events for player accounts.

use millionaire_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when a player account is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOpened {
    /// The player identifier.
    pub player_id: Uuid,
    /// Display name.
    pub name: String,
}

/// Emitted when the player starts a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStarted {
    /// The player identifier.
    pub player_id: Uuid,
    /// The game now in progress.
    pub game_id: Uuid,
}

/// Emitted when the player's game finishes; credits the payout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettled {
    /// The player identifier.
    pub player_id: Uuid,
    /// The finished game.
    pub game_id: Uuid,
    /// Amount credited to the balance (0 for a lost game).
    pub payout: u64,
}

/// Event type identifier for [`AccountOpened`].
pub const ACCOUNT_OPENED_EVENT_TYPE: &str = "account.opened";

/// Event type identifier for [`GameStarted`].
pub const GAME_STARTED_EVENT_TYPE: &str = "account.game_started";

/// Event type identifier for [`GameSettled`].
pub const GAME_SETTLED_EVENT_TYPE: &str = "account.game_settled";

/// Event payload variants for player accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AccountEventKind {
    /// The account has been opened.
    AccountOpened(AccountOpened),
    /// A game has been started.
    GameStarted(GameStarted),
    /// A game has been settled.
    GameSettled(GameSettled),
}

impl AccountEventKind {
    /// The event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AccountOpened(_) => ACCOUNT_OPENED_EVENT_TYPE,
            Self::GameStarted(_) => GAME_STARTED_EVENT_TYPE,
            Self::GameSettled(_) => GAME_SETTLED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for player accounts.
#[derive(Debug, Clone)]
pub struct AccountEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: AccountEventKind,
}

impl DomainEvent for AccountEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("AccountEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
