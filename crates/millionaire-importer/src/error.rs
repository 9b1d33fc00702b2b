//! Millionaire — importer error types.

use millionaire_catalog::error::CatalogError;
use millionaire_core::error::DomainError;
use thiserror::Error;

/// Startup and import errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The question pack could not be read.
    #[error("cannot read question pack: {0}")]
    Io(#[from] std::io::Error),

    /// The question pack is malformed or holds invalid questions.
    #[error("invalid question pack: {0}")]
    Catalog(#[from] CatalogError),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the schema migrations failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Writing to the question pool failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
