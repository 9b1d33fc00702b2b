//! Commands for game sessions.

use millionaire_core::command::Command;
use uuid::Uuid;

/// Command to create a game for a player.
#[derive(Debug, Clone)]
pub struct CreateGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identifier of the new game.
    pub game_id: Uuid,
    /// The player starting the game.
    pub player_id: Uuid,
}

/// Command to answer the current question.
#[derive(Debug, Clone)]
pub struct AnswerQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game identifier.
    pub game_id: Uuid,
    /// The key the player picked (`a`..`d`).
    pub answer_key: String,
}

/// Command to take the money and leave the game.
#[derive(Debug, Clone)]
pub struct TakeMoney {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game identifier.
    pub game_id: Uuid,
}

/// Command to close a game whose time limit has run out.
#[derive(Debug, Clone)]
pub struct ExpireGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game identifier.
    pub game_id: Uuid,
}

impl Command for CreateGame {
    fn command_type(&self) -> &'static str {
        "game.create_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.game_id
    }
}

impl Command for AnswerQuestion {
    fn command_type(&self) -> &'static str {
        "game.answer_question"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.game_id
    }
}

impl Command for TakeMoney {
    fn command_type(&self) -> &'static str {
        "game.take_money"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.game_id
    }
}

impl Command for ExpireGame {
    fn command_type(&self) -> &'static str {
        "game.expire_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.game_id
    }
}
