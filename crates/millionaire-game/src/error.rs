//! Game error types.

use millionaire_core::error::DomainError;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by game commands.
#[derive(Debug, Error)]
pub enum GameError {
    /// The question pool cannot fill a level of the ladder.
    #[error("question pool has no questions for level {level}")]
    InsufficientQuestions {
        /// The first level without candidates.
        level: u8,
    },

    /// Cash out requested before any question was answered.
    #[error("nothing to cash out in game {0}: no question answered yet")]
    NothingToCashOut(Uuid),

    /// The game has already reached a terminal status.
    #[error("game {0} is already finished")]
    SessionFinished(Uuid),

    /// A shared domain or infrastructure error.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
