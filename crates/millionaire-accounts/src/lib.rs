//! Millionaire — player accounts.
//!
//! The balance ledger games pay into. An account also remembers which game
//! its player currently has in progress, so a player runs one game at a time.

pub mod application;
pub mod domain;
