//! Domain layer for game sessions.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod ladder;
pub mod prizes;
pub mod status;
