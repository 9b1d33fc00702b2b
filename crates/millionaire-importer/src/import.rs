//! The import run: read, validate, migrate, store.

use std::path::Path;

use millionaire_catalog::import::{missing_levels, parse_question_pack};
use millionaire_catalog::question::Question;
use millionaire_event_store::pg_question_repository::PgQuestionRepository;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument, warn};

use crate::config::ImportConfig;
use crate::error::AppError;

/// What an import run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Distinct valid questions in the pack.
    pub parsed: usize,
    /// Questions newly stored; the rest were already in the pool.
    pub inserted: u64,
    /// Ladder levels the pack has no question for.
    pub missing_levels: Vec<u8>,
}

/// Reads and validates the question pack at `path`.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be read and `AppError::Catalog`
/// if its contents are invalid.
pub async fn load_pack(path: &Path) -> Result<Vec<Question>, AppError> {
    let source = tokio::fs::read_to_string(path).await?;
    Ok(parse_question_pack(&source)?)
}

/// Runs one import with `config`.
///
/// A pack that leaves ladder levels uncovered is still imported; games cannot
/// be created until the pool covers every level, so the gaps are logged.
///
/// # Errors
///
/// Returns `AppError` if the pack is unreadable or invalid, or if connecting,
/// migrating or writing to the database fails.
#[instrument(skip_all, fields(path = %config.questions_path.display()))]
pub async fn run(config: &ImportConfig) -> Result<ImportSummary, AppError> {
    let questions = load_pack(&config.questions_path).await?;
    let missing = missing_levels(&questions);
    if !missing.is_empty() {
        warn!(levels = ?missing, "question pack leaves ladder levels empty");
    }
    info!(questions = questions.len(), "question pack parsed");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let repo = PgQuestionRepository::new(pool);
    let inserted = repo.upsert_questions(&questions).await?;
    for (level, total) in repo.count_by_level().await? {
        info!(level, total, "question pool level size");
    }

    Ok(ImportSummary {
        parsed: questions.len(),
        inserted,
        missing_levels: missing,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use millionaire_catalog::question::LEVEL_COUNT;

    use super::*;

    fn sample_pack() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/questions.yaml")
    }

    #[tokio::test]
    async fn test_load_pack_reads_bundled_sample() {
        // Act
        let questions = load_pack(&sample_pack()).await.unwrap();

        // Assert
        assert_eq!(questions.len(), usize::from(LEVEL_COUNT) * 2);
        assert!(missing_levels(&questions).is_empty());
    }

    #[tokio::test]
    async fn test_load_pack_reports_missing_file() {
        let result = load_pack(Path::new("does/not/exist.yaml")).await;

        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
