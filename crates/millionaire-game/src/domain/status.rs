//! Game status derivation.
//!
//! A finished game's status is decided by the first matching rule of
//! [`TERMINAL_RULES`]. Order matters: a failed game that ran out of time is a
//! timeout, not a plain failure.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::prizes::LADDER_LEN;

/// Externally visible game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// The game is still running.
    InProgress,
    /// Every question on the ladder was answered correctly.
    Won,
    /// A wrong answer ended the game.
    Fail,
    /// The game ended after its time limit ran out.
    Timeout,
    /// The player took the money.
    Money,
}

/// The fields status derivation reads.
#[derive(Debug, Clone, Copy)]
pub struct StatusFacts {
    /// Whether the game has a finish time.
    pub finished: bool,
    /// Whether the game ended on a failed answer.
    pub is_failed: bool,
    /// Time between creation and finish.
    pub elapsed: TimeDelta,
    /// The game's time limit.
    pub time_limit: TimeDelta,
    /// Index of the current (unanswered) question.
    pub current_level: usize,
}

struct TerminalRule {
    status: GameStatus,
    applies: fn(&StatusFacts) -> bool,
}

fn failed_after_deadline(facts: &StatusFacts) -> bool {
    facts.is_failed && facts.elapsed >= facts.time_limit
}

fn failed(facts: &StatusFacts) -> bool {
    facts.is_failed
}

fn ladder_cleared(facts: &StatusFacts) -> bool {
    facts.current_level >= LADDER_LEN
}

fn any(_facts: &StatusFacts) -> bool {
    true
}

const TERMINAL_RULES: [TerminalRule; 4] = [
    TerminalRule {
        status: GameStatus::Timeout,
        applies: failed_after_deadline,
    },
    TerminalRule {
        status: GameStatus::Fail,
        applies: failed,
    },
    TerminalRule {
        status: GameStatus::Won,
        applies: ladder_cleared,
    },
    TerminalRule {
        status: GameStatus::Money,
        applies: any,
    },
];

/// Derives the status from `facts`. Unfinished games are always in progress.
#[must_use]
pub fn derive_status(facts: &StatusFacts) -> GameStatus {
    if !facts.finished {
        return GameStatus::InProgress;
    }
    TERMINAL_RULES
        .iter()
        .find(|rule| (rule.applies)(facts))
        .map_or(GameStatus::Money, |rule| rule.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_facts() -> StatusFacts {
        StatusFacts {
            finished: true,
            is_failed: false,
            elapsed: TimeDelta::minutes(5),
            time_limit: TimeDelta::minutes(35),
            current_level: 3,
        }
    }

    #[test]
    fn test_unfinished_game_is_in_progress_whatever_the_flags() {
        let facts = StatusFacts {
            finished: false,
            is_failed: true,
            elapsed: TimeDelta::hours(3),
            current_level: LADDER_LEN,
            ..finished_facts()
        };

        assert_eq!(derive_status(&facts), GameStatus::InProgress);
    }

    #[test]
    fn test_cleared_ladder_is_won() {
        let facts = StatusFacts {
            current_level: LADDER_LEN,
            ..finished_facts()
        };

        assert_eq!(derive_status(&facts), GameStatus::Won);
    }

    #[test]
    fn test_failed_within_limit_is_fail() {
        let facts = StatusFacts {
            is_failed: true,
            ..finished_facts()
        };

        assert_eq!(derive_status(&facts), GameStatus::Fail);
    }

    #[test]
    fn test_failed_at_or_past_limit_is_timeout() {
        let at_limit = StatusFacts {
            is_failed: true,
            elapsed: TimeDelta::minutes(35),
            ..finished_facts()
        };
        let past_limit = StatusFacts {
            is_failed: true,
            elapsed: TimeDelta::hours(1),
            ..finished_facts()
        };

        assert_eq!(derive_status(&at_limit), GameStatus::Timeout);
        assert_eq!(derive_status(&past_limit), GameStatus::Timeout);
    }

    #[test]
    fn test_timeout_takes_precedence_over_cleared_ladder() {
        let facts = StatusFacts {
            is_failed: true,
            elapsed: TimeDelta::hours(2),
            current_level: LADDER_LEN,
            ..finished_facts()
        };

        assert_eq!(derive_status(&facts), GameStatus::Timeout);
    }

    #[test]
    fn test_late_finish_without_failure_is_money() {
        let facts = StatusFacts {
            elapsed: TimeDelta::hours(2),
            ..finished_facts()
        };

        assert_eq!(derive_status(&facts), GameStatus::Money);
    }

    #[test]
    fn test_status_serializes_in_snake_case() {
        let json = serde_json::to_value(GameStatus::InProgress).unwrap();

        assert_eq!(json, "in_progress");
    }
}
