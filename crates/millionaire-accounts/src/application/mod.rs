//! Application layer for player accounts.

pub mod command_handlers;
pub mod query_handlers;
