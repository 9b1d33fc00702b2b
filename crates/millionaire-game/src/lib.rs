//! Millionaire — game sessions.
//!
//! Responsible for drawing a ladder of fifteen questions for a player,
//! advancing through it answer by answer, enforcing the time limit, deriving
//! the game status, and settling the prize with the player's account.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
