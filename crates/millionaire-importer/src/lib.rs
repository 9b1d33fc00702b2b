//! Millionaire — question pack importer.
//!
//! Reads a YAML question pack, validates it, applies the database migrations
//! and stores the questions in the pool games draw from.

pub mod config;
pub mod error;
pub mod import;
