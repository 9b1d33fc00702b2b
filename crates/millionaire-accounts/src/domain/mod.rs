//! Domain layer for player accounts.

pub mod aggregates;
pub mod commands;
pub mod events;
