//! Command abstractions.

use uuid::Uuid;

/// A request to change one aggregate stream.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted command name, `<context>.<action>` (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID carried into every event the command produces.
    fn correlation_id(&self) -> Uuid;

    /// The stream the command is addressed to.
    fn target_id(&self) -> Uuid;
}
