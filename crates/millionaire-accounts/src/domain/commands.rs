//! Commands for player accounts.

use millionaire_core::command::Command;
use uuid::Uuid;

/// Command to open a player account.
#[derive(Debug, Clone)]
pub struct OpenAccount {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player identifier.
    pub player_id: Uuid,
    /// Display name.
    pub name: String,
}

impl Command for OpenAccount {
    fn command_type(&self) -> &'static str {
        "account.open_account"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Uuid {
        self.player_id
    }
}
