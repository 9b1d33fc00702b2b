//! Application layer for game sessions.

pub mod command_handlers;
pub mod query_handlers;
