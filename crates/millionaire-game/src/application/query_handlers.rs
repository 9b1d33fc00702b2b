//! Query handlers for game sessions.
//!
//! Queries reconstitute the game from its stream and return read-only views.
//! A view never exposes the correct answer of the question being asked.

use chrono::{DateTime, Utc};
use millionaire_core::aggregate::AggregateRoot;
use millionaire_core::error::DomainError;
use millionaire_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::load_game;
use crate::domain::ladder::{AnswerVariant, GameQuestion};
use crate::domain::prizes::fireproof_prize;
use crate::domain::status::GameStatus;

/// A question as shown to the player.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    /// Ladder level.
    pub level: u8,
    /// Question text.
    pub text: String,
    /// Answer variants keyed `a`..`d`.
    pub variants: Vec<AnswerVariant>,
}

impl From<&GameQuestion> for QuestionView {
    fn from(question: &GameQuestion) -> Self {
        Self {
            level: question.level,
            text: question.text.clone(),
            variants: question.variants.clone(),
        }
    }
}

/// Read-only view of a game.
#[derive(Debug, Serialize)]
pub struct GameView {
    /// The game identifier.
    pub game_id: Uuid,
    /// The owning player.
    pub player_id: Option<Uuid>,
    /// Status derived from the recorded fields.
    pub status: GameStatus,
    /// Index of the current unanswered question.
    pub current_level: usize,
    /// Index of the last answered question.
    pub previous_level: Option<usize>,
    /// The question waiting for an answer, while the game runs.
    pub current_question: Option<QuestionView>,
    /// Amount credited when the game finished.
    pub prize: u64,
    /// Checkpoint prize secured by the questions cleared so far. Shown to
    /// the player only; a failed game pays nothing.
    pub fireproof_prize: u64,
    /// When the game was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the game finished; `None` while it runs.
    pub finished_at: Option<DateTime<Utc>>,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves a game by id.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_game_by_id(
    game_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<GameView, DomainError> {
    let game = load_game(game_id, repo).await?;
    let current_question = if game.is_finished() {
        None
    } else {
        game.current_question().map(QuestionView::from)
    };
    Ok(GameView {
        game_id,
        player_id: game.player_id(),
        status: game.status(),
        current_level: game.current_level(),
        previous_level: game.previous_level(),
        current_question,
        prize: game.prize(),
        fireproof_prize: game.previous_level().map_or(0, fireproof_prize),
        created_at: game.created_at(),
        finished_at: game.finished_at(),
        version: game.version(),
    })
}
