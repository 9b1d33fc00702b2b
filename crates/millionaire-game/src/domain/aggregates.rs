//! Aggregate roots for game sessions.

use chrono::{DateTime, TimeDelta, Utc};
use millionaire_core::aggregate::AggregateRoot;
use millionaire_core::clock::Clock;
use millionaire_core::error::DomainError;
use millionaire_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    AnswerAccepted, FailureReason, GameCreated, GameEvent, GameEventKind, GameFailed, GameWon,
    MoneyTaken,
};
use super::ladder::GameQuestion;
use super::prizes::{LADDER_LEN, PRIZES, cash_out_prize};
use super::status::{GameStatus, StatusFacts, derive_status};
use crate::config::GameConfig;
use crate::error::GameError;

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Correct; the game moves on to `next_level`.
    Correct {
        /// The new current level.
        next_level: usize,
    },
    /// Correct answer to the last question.
    Won {
        /// Prize credited to the player.
        prize: u64,
    },
    /// Wrong or late answer; the game is over.
    Failed {
        /// Why the answer failed.
        reason: FailureReason,
    },
}

impl AnswerOutcome {
    /// Whether the answer counted as correct.
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct { .. } | Self::Won { .. })
    }

    /// The amount to settle with the player if the answer ended the game.
    /// Only a win pays; a failed game settles with 0 whatever checkpoint the
    /// player had reached.
    #[must_use]
    pub fn payout(self) -> Option<u64> {
        match self {
            Self::Correct { .. } => None,
            Self::Won { prize } => Some(prize),
            Self::Failed { .. } => Some(0),
        }
    }
}

/// The aggregate root for a game session.
#[derive(Debug)]
pub struct Game {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Owner of the game (set by `GameCreated`).
    pub(crate) player_id: Option<Uuid>,
    /// The question ladder, immutable after creation.
    pub(crate) questions: Vec<GameQuestion>,
    /// Index of the current unanswered question.
    pub(crate) current_level: usize,
    pub(crate) is_failed: bool,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) finished_at: Option<DateTime<Utc>>,
    pub(crate) time_limit: TimeDelta,
    /// Amount credited when the game finished.
    pub(crate) prize: u64,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<GameEvent>,
}

impl Game {
    /// Creates an empty game shell; `create` fills it.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            player_id: None,
            questions: Vec::new(),
            current_level: 0,
            is_failed: false,
            created_at: None,
            finished_at: None,
            time_limit: GameConfig::default().time_limit,
            prize: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: GameEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = GameEvent {
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

    /// Creates the game for `player_id` with a drawn ladder, producing a
    /// `GameCreated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game already exists or the
    /// ladder does not hold exactly one question per level in order.
    pub fn create(
        &mut self,
        player_id: Uuid,
        questions: Vec<GameQuestion>,
        config: &GameConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), GameError> {
        if self.created_at.is_some() || !self.uncommitted_events.is_empty() {
            return Err(DomainError::Validation(format!("game {} already exists", self.id)).into());
        }
        let ordered = questions.len() == LADDER_LEN
            && questions
                .iter()
                .enumerate()
                .all(|(index, question)| usize::from(question.level) == index);
        if !ordered {
            return Err(DomainError::Validation(format!(
                "a game needs exactly {LADDER_LEN} questions, one per level in order"
            ))
            .into());
        }

        self.record(
            GameEventKind::GameCreated(GameCreated {
                game_id: self.id,
                player_id,
                questions,
                time_limit_seconds: config.time_limit.num_seconds(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Answers the current question with `answer_key`.
    ///
    /// A late answer fails the game as a timeout whatever the key. A correct
    /// answer on the last level wins the top prize.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionFinished` if the game is over, and
    /// `DomainError::AggregateNotFound` if it was never created.
    pub fn answer_current_question(
        &mut self,
        answer_key: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<AnswerOutcome, GameError> {
        self.ensure_in_progress()?;

        if self.is_timed_out(clock.now()) {
            self.record_failure(Some(answer_key), FailureReason::TimedOut, correlation_id, clock);
            return Ok(AnswerOutcome::Failed {
                reason: FailureReason::TimedOut,
            });
        }

        let level = self.current_level;
        let correct = self
            .current_question()
            .is_some_and(|question| question.is_correct(answer_key));
        if !correct {
            self.record_failure(
                Some(answer_key),
                FailureReason::WrongAnswer,
                correlation_id,
                clock,
            );
            return Ok(AnswerOutcome::Failed {
                reason: FailureReason::WrongAnswer,
            });
        }

        let next_level = level + 1;
        if next_level == LADDER_LEN {
            let prize = PRIZES[LADDER_LEN - 1];
            self.record(
                GameEventKind::GameWon(GameWon {
                    game_id: self.id,
                    answer_key: answer_key.to_owned(),
                    prize,
                }),
                correlation_id,
                clock,
            );
            return Ok(AnswerOutcome::Won { prize });
        }

        self.record(
            GameEventKind::AnswerAccepted(AnswerAccepted {
                game_id: self.id,
                level,
                answer_key: answer_key.to_owned(),
            }),
            correlation_id,
            clock,
        );
        Ok(AnswerOutcome::Correct { next_level })
    }

    /// Ends the game voluntarily and returns the prize for the last cleared
    /// question. If the time limit has already run out the game is closed as a
    /// timeout instead and the prize is 0.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionFinished` if the game is over,
    /// `GameError::NothingToCashOut` before the first correct answer, and
    /// `DomainError::AggregateNotFound` if the game was never created.
    pub fn take_money(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<u64, GameError> {
        self.ensure_in_progress()?;
        if self.current_level == 0 {
            return Err(GameError::NothingToCashOut(self.id));
        }

        if self.is_timed_out(clock.now()) {
            self.record_failure(None, FailureReason::TimedOut, correlation_id, clock);
            return Ok(0);
        }

        let prize = cash_out_prize(self.current_level);
        self.record(
            GameEventKind::MoneyTaken(MoneyTaken {
                game_id: self.id,
                level: self.current_level,
                prize,
            }),
            correlation_id,
            clock,
        );
        Ok(prize)
    }

    /// Closes the game as a timeout if it is still running past its time
    /// limit. Returns whether it did.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the game was never created.
    pub fn expire(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<bool, GameError> {
        if self.created_at.is_none() {
            return Err(DomainError::AggregateNotFound(self.id).into());
        }
        if self.is_finished() || !self.is_timed_out(clock.now()) {
            return Ok(false);
        }
        self.record_failure(None, FailureReason::TimedOut, correlation_id, clock);
        Ok(true)
    }

    fn record_failure(
        &mut self,
        answer_key: Option<&str>,
        reason: FailureReason,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        self.record(
            GameEventKind::GameFailed(GameFailed {
                game_id: self.id,
                level: self.current_level,
                answer_key: answer_key.map(str::to_owned),
                reason,
            }),
            correlation_id,
            clock,
        );
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.created_at.is_none() {
            return Err(DomainError::AggregateNotFound(self.id).into());
        }
        if self.is_finished() {
            return Err(GameError::SessionFinished(self.id));
        }
        Ok(())
    }

    /// The player who owns the game, once created.
    #[must_use]
    pub fn player_id(&self) -> Option<Uuid> {
        self.player_id
    }

    /// The full ladder.
    #[must_use]
    pub fn questions(&self) -> &[GameQuestion] {
        &self.questions
    }

    /// Index of the current unanswered question.
    #[must_use]
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Index of the last answered question, if any.
    #[must_use]
    pub fn previous_level(&self) -> Option<usize> {
        self.current_level.checked_sub(1)
    }

    /// The question waiting for an answer; `None` once the ladder is cleared.
    #[must_use]
    pub fn current_question(&self) -> Option<&GameQuestion> {
        self.questions.get(self.current_level)
    }

    /// The question answered last, if any.
    #[must_use]
    pub fn previous_question(&self) -> Option<&GameQuestion> {
        self.previous_level()
            .and_then(|level| self.questions.get(level))
    }

    /// Whether the game ended on a wrong or late answer.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.is_failed
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Finish time; `None` while the game runs.
    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Whether the game has reached a terminal status.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Amount credited to the player when the game finished.
    #[must_use]
    pub fn prize(&self) -> u64 {
        self.prize
    }

    /// Whether more than the time limit has passed since creation at `now`.
    #[must_use]
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        self.created_at
            .is_some_and(|created_at| now - created_at > self.time_limit)
    }

    /// The game status, derived from the recorded fields only.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let elapsed = match (self.created_at, self.finished_at) {
            (Some(created_at), Some(finished_at)) => finished_at - created_at,
            _ => TimeDelta::zero(),
        };
        derive_status(&StatusFacts {
            finished: self.is_finished(),
            is_failed: self.is_failed,
            elapsed,
            time_limit: self.time_limit,
            current_level: self.current_level,
        })
    }
}

impl AggregateRoot for Game {
    type Event = GameEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        let occurred_at = event.metadata.occurred_at;
        match &event.kind {
            GameEventKind::GameCreated(payload) => {
                self.player_id = Some(payload.player_id);
                self.questions.clone_from(&payload.questions);
                self.time_limit = TimeDelta::seconds(payload.time_limit_seconds);
                self.created_at = Some(occurred_at);
            }
            GameEventKind::AnswerAccepted(payload) => {
                self.current_level = payload.level + 1;
            }
            GameEventKind::GameWon(payload) => {
                self.current_level = LADDER_LEN;
                self.prize = payload.prize;
                self.finished_at = Some(occurred_at);
            }
            GameEventKind::GameFailed(_) => {
                self.is_failed = true;
                self.finished_at = Some(occurred_at);
            }
            GameEventKind::MoneyTaken(payload) => {
                self.prize = payload.prize;
                self.finished_at = Some(occurred_at);
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
