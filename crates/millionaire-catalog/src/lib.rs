//! Millionaire — question catalog.
//!
//! Owns the pool of leveled questions games draw from: the `Question` type,
//! the `QuestionRepository` seam, and parsing of YAML question packs.

pub mod error;
pub mod import;
pub mod question;
pub mod repository;
