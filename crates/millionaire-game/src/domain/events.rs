//! Domain events for game sessions.

use millionaire_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ladder::GameQuestion;

/// Emitted when a game is created with its question ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCreated {
    /// The game identifier.
    pub game_id: Uuid,
    /// The player the game belongs to.
    pub player_id: Uuid,
    /// The ladder, one question per level in ascending order.
    pub questions: Vec<GameQuestion>,
    /// Time limit for the whole game, in seconds.
    pub time_limit_seconds: i64,
}

/// Emitted when a question below the top level is answered correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAccepted {
    /// The game identifier.
    pub game_id: Uuid,
    /// Level of the answered question.
    pub level: usize,
    /// The submitted key.
    pub answer_key: String,
}

/// Emitted when the last question is answered correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWon {
    /// The game identifier.
    pub game_id: Uuid,
    /// The submitted key.
    pub answer_key: String,
    /// Prize credited to the player.
    pub prize: u64,
}

/// Why a game failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The submitted key was not the correct one.
    WrongAnswer,
    /// The game's time limit ran out.
    TimedOut,
}

/// Emitted when a game ends in failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameFailed {
    /// The game identifier.
    pub game_id: Uuid,
    /// Level of the question that was current.
    pub level: usize,
    /// The submitted key, if the failure came from an answer.
    pub answer_key: Option<String>,
    /// Why the game failed.
    pub reason: FailureReason,
}

/// Emitted when the player takes the money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyTaken {
    /// The game identifier.
    pub game_id: Uuid,
    /// Number of questions cleared.
    pub level: usize,
    /// Prize credited to the player.
    pub prize: u64,
}

/// Event type identifier for [`GameCreated`].
pub const GAME_CREATED_EVENT_TYPE: &str = "game.created";

/// Event type identifier for [`AnswerAccepted`].
pub const ANSWER_ACCEPTED_EVENT_TYPE: &str = "game.answer_accepted";

/// Event type identifier for [`GameWon`].
pub const GAME_WON_EVENT_TYPE: &str = "game.won";

/// Event type identifier for [`GameFailed`].
pub const GAME_FAILED_EVENT_TYPE: &str = "game.failed";

/// Event type identifier for [`MoneyTaken`].
pub const MONEY_TAKEN_EVENT_TYPE: &str = "game.money_taken";

/// Event payload variants for game sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEventKind {
    /// A game has been created.
    GameCreated(GameCreated),
    /// A question has been answered correctly.
    AnswerAccepted(AnswerAccepted),
    /// The ladder has been cleared.
    GameWon(GameWon),
    /// The game has failed.
    GameFailed(GameFailed),
    /// The player has taken the money.
    MoneyTaken(MoneyTaken),
}

impl GameEventKind {
    /// The event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GameCreated(_) => GAME_CREATED_EVENT_TYPE,
            Self::AnswerAccepted(_) => ANSWER_ACCEPTED_EVENT_TYPE,
            Self::GameWon(_) => GAME_WON_EVENT_TYPE,
            Self::GameFailed(_) => GAME_FAILED_EVENT_TYPE,
            Self::MoneyTaken(_) => MONEY_TAKEN_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for game sessions.
#[derive(Debug, Clone)]
pub struct GameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("GameEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
