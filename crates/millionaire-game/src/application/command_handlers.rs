//! Command handlers for game sessions.
//!
//! Each handler loads the game stream, runs the synchronous domain method and
//! appends the produced events. When a game finishes, the player's account is
//! settled in the same atomic append so a payout is written exactly once.

use std::sync::Mutex;

use millionaire_accounts::application::command_handlers::load_account;
use millionaire_accounts::domain::aggregates::PlayerAccount;
use millionaire_catalog::question::{LEVEL_COUNT, Question};
use millionaire_catalog::repository::QuestionRepository;
use millionaire_core::aggregate::AggregateRoot;
use millionaire_core::clock::Clock;
use millionaire_core::command::Command;
use millionaire_core::error::DomainError;
use millionaire_core::event::{DomainEvent, EventMetadata};
use millionaire_core::repository::{EventRepository, StoredEvent, StreamAppend};
use millionaire_core::rng::DeterministicRng;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::domain::aggregates::{AnswerOutcome, Game};
use crate::domain::commands::{AnswerQuestion, CreateGame, ExpireGame, TakeMoney};
use crate::domain::events::{GameEvent, GameEventKind};
use crate::domain::ladder::draw_ladder;
use crate::domain::status::GameStatus;
use crate::error::GameError;

/// Outcome of `handle_answer_question`.
#[derive(Debug, Serialize)]
pub struct AnswerResult {
    /// The game identifier.
    pub game_id: Uuid,
    /// Whether the answer was accepted as correct.
    pub correct: bool,
    /// Status after the answer.
    pub status: GameStatus,
    /// Current level after the answer.
    pub current_level: usize,
    /// Events appended by the command, game stream first.
    #[serde(skip)]
    pub stored_events: Vec<StoredEvent>,
}

/// Outcome of `handle_take_money`.
#[derive(Debug, Serialize)]
pub struct CashOutResult {
    /// The game identifier.
    pub game_id: Uuid,
    /// Amount credited to the player.
    pub prize: u64,
    /// Status after cashing out (`money`, or `timeout` if time had run out).
    pub status: GameStatus,
    /// Events appended by the command, game stream first.
    #[serde(skip)]
    pub stored_events: Vec<StoredEvent>,
}

/// Reconstitutes a `Game` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub fn reconstitute(game_id: Uuid, existing_events: &[StoredEvent]) -> Result<Game, DomainError> {
    let mut game = Game::new(game_id);
    for stored in existing_events {
        let kind: GameEventKind = serde_json::from_value(stored.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!("event deserialization failed: {e}"))
        })?;
        let event = GameEvent {
            metadata: EventMetadata::from_stored(stored),
            kind,
        };
        game.apply(&event);
    }
    Ok(game)
}

/// Loads an existing game.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the game has no events, and any
/// error from the repository or from reconstitution.
pub async fn load_game(game_id: Uuid, repo: &dyn EventRepository) -> Result<Game, DomainError> {
    let existing_events = repo.load_events(game_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(game_id));
    }
    reconstitute(game_id, &existing_events)
}

fn pending_events<A: AggregateRoot>(aggregate: &A) -> Vec<StoredEvent> {
    aggregate
        .uncommitted_events()
        .iter()
        .map(DomainEvent::to_stored_event)
        .collect()
}

/// Appends the pending events of `games`, together with the account's when
/// given, in one atomic write, then marks every aggregate committed.
async fn persist(
    games: &mut [&mut Game],
    account: Option<&mut PlayerAccount>,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let game_events: Vec<Vec<StoredEvent>> =
        games.iter().map(|game| pending_events(&**game)).collect();
    let account_events = account.as_deref().map(pending_events).unwrap_or_default();

    let mut batches: Vec<StreamAppend<'_>> = games
        .iter()
        .zip(&game_events)
        .map(|(game, events)| StreamAppend {
            aggregate_id: game.id,
            expected_version: game.version(),
            events,
        })
        .collect();
    if let Some(account) = account.as_deref() {
        batches.push(StreamAppend {
            aggregate_id: account.aggregate_id(),
            expected_version: account.version(),
            events: &account_events,
        });
    }
    if let Err(err) = repo.append_streams(&batches).await {
        if err.is_conflict() {
            warn!(error = %err, "game changed since it was loaded");
        }
        return Err(err);
    }

    for game in games.iter_mut() {
        game.mark_committed();
    }
    if let Some(account) = account {
        account.mark_committed();
    }

    let mut stored_events: Vec<StoredEvent> = game_events.into_iter().flatten().collect();
    stored_events.extend(account_events);
    Ok(stored_events)
}

/// Closes the player's game in progress if its time limit has run out and
/// settles it on `account` with no payout. Returns the closed game, still
/// holding its pending events.
async fn release_overdue_game(
    account: &mut PlayerAccount,
    correlation_id: Uuid,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Option<Game>, GameError> {
    let Some(active_id) = account.active_game() else {
        return Ok(None);
    };
    let mut active = load_game(active_id, repo).await?;
    if !active.expire(correlation_id, clock)? {
        return Ok(None);
    }
    account.settle_game(active_id, 0, correlation_id, clock)?;
    info!(previous_game_id = %active_id, "overdue game closed as timed out");
    Ok(Some(active))
}

/// Persists a game step, settling the player's account with `payout` when
/// the step finished the game.
async fn persist_step(
    game: &mut Game,
    payout: Option<u64>,
    correlation_id: Uuid,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, GameError> {
    let Some(payout) = payout else {
        return Ok(persist(&mut [game], None, repo).await?);
    };

    let player_id = game
        .player_id()
        .ok_or(DomainError::AggregateNotFound(game.id))?;
    let mut account = load_account(player_id, repo).await?;
    account.settle_game(game.id, payout, correlation_id, clock)?;
    Ok(persist(&mut [game], Some(&mut account), repo).await?)
}

/// Handles the `CreateGame` command: draws one question per level from the
/// pool, creates the game and marks it as the player's game in progress.
///
/// A previous game the player left running past its time limit is closed as
/// timed out, with no payout, in the same write.
///
/// The question pool is read before the RNG is locked; the `Mutex` is held
/// only around the synchronous draw.
///
/// # Errors
///
/// Returns `GameError::InsufficientQuestions` if a level has no candidates,
/// `DomainError::AggregateNotFound` if the player has no account,
/// `DomainError::Validation` if the player already has a game in progress or
/// the game id is taken, and `DomainError` from the repositories. Nothing is
/// persisted on error.
#[instrument(
    skip_all,
    fields(command = command.command_type(), game_id = %command.target_id(), player_id = %command.player_id)
)]
pub async fn handle_create_game(
    command: &CreateGame,
    config: &GameConfig,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    questions: &dyn QuestionRepository,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, GameError> {
    let mut account = load_account(command.player_id, repo).await?;
    let existing_events = repo.load_events(command.game_id).await?;
    let mut game = reconstitute(command.game_id, &existing_events)?;

    let mut candidates_by_level: Vec<Vec<Question>> = Vec::with_capacity(LEVEL_COUNT.into());
    for level in 0..LEVEL_COUNT {
        candidates_by_level.push(questions.questions_for_level(level).await?);
    }

    let ladder = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        draw_ladder(&candidates_by_level, &mut *rng_guard)
    };
    let ladder = match ladder {
        Ok(ladder) => ladder,
        Err(err) => {
            warn!(error = %err, "question pool cannot fill the ladder");
            return Err(err);
        }
    };

    game.create(
        command.player_id,
        ladder,
        config,
        command.correlation_id,
        clock,
    )?;
    let mut overdue =
        release_overdue_game(&mut account, command.correlation_id, clock, repo).await?;
    account.start_game(command.game_id, command.correlation_id, clock)?;

    let mut games: Vec<&mut Game> = vec![&mut game];
    games.extend(overdue.as_mut());
    let stored_events = persist(&mut games, Some(&mut account), repo).await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "game created"
    );

    Ok(stored_events)
}

/// Handles the `AnswerQuestion` command.
///
/// # Errors
///
/// Returns `GameError::SessionFinished` if the game is over,
/// `DomainError::AggregateNotFound` if it does not exist, and `DomainError`
/// from the repository (including `ConcurrencyConflict` for a stale write).
#[instrument(skip_all, fields(command = command.command_type(), game_id = %command.target_id()))]
pub async fn handle_answer_question(
    command: &AnswerQuestion,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<AnswerResult, GameError> {
    let mut game = load_game(command.game_id, repo).await?;

    let outcome =
        game.answer_current_question(&command.answer_key, command.correlation_id, clock)?;
    let stored_events = persist_step(
        &mut game,
        outcome.payout(),
        command.correlation_id,
        clock,
        repo,
    )
    .await?;

    match outcome {
        AnswerOutcome::Correct { next_level } => {
            info!(level = next_level, "answer accepted");
        }
        AnswerOutcome::Won { prize } => {
            info!(prize, "game won");
        }
        AnswerOutcome::Failed { reason } => {
            info!(?reason, level = game.current_level(), "game failed");
        }
    }

    Ok(AnswerResult {
        game_id: game.id,
        correct: outcome.is_correct(),
        status: game.status(),
        current_level: game.current_level(),
        stored_events,
    })
}

/// Handles the `TakeMoney` command: ends the game and credits the prize of
/// the last cleared level.
///
/// # Errors
///
/// Returns `GameError::SessionFinished` if the game is over,
/// `GameError::NothingToCashOut` before the first correct answer, and
/// `DomainError` from the repository.
#[instrument(skip_all, fields(command = command.command_type(), game_id = %command.target_id()))]
pub async fn handle_take_money(
    command: &TakeMoney,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<CashOutResult, GameError> {
    let mut game = load_game(command.game_id, repo).await?;

    let prize = match game.take_money(command.correlation_id, clock) {
        Ok(prize) => prize,
        Err(err) => {
            warn!(error = %err, "cash out rejected");
            return Err(err);
        }
    };
    let stored_events =
        persist_step(&mut game, Some(prize), command.correlation_id, clock, repo).await?;

    info!(
        command_type = command.command_type(),
        prize,
        status = ?game.status(),
        "money taken"
    );

    Ok(CashOutResult {
        game_id: game.id,
        prize,
        status: game.status(),
        stored_events,
    })
}

/// Handles the `ExpireGame` command: closes a game whose time limit has run
/// out and releases the player's account. Returns no events when the game is
/// already finished or still within its limit.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the game does not exist and
/// `DomainError` from the repository.
#[instrument(skip_all, fields(command = command.command_type(), game_id = %command.target_id()))]
pub async fn handle_expire_game(
    command: &ExpireGame,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, GameError> {
    let mut game = load_game(command.game_id, repo).await?;

    if !game.expire(command.correlation_id, clock)? {
        return Ok(Vec::new());
    }
    let stored_events =
        persist_step(&mut game, Some(0), command.correlation_id, clock, repo).await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "game expired"
    );

    Ok(stored_events)
}
