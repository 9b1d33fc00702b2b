//! Game configuration.

use chrono::TimeDelta;

/// Default time budget of a game, in minutes.
pub const DEFAULT_TIME_LIMIT_MINUTES: i64 = 35;

/// Settings frozen into every game at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// How long a player may take for the whole ladder.
    pub time_limit: TimeDelta,
}

impl GameConfig {
    /// Configuration with a custom time limit.
    #[must_use]
    pub fn with_time_limit(time_limit: TimeDelta) -> Self {
        Self { time_limit }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit: TimeDelta::minutes(DEFAULT_TIME_LIMIT_MINUTES),
        }
    }
}
