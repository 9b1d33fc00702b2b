//! `PostgreSQL` implementation of the `QuestionRepository` trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use millionaire_catalog::question::Question;
use millionaire_catalog::repository::QuestionRepository;
use millionaire_core::error::DomainError;

/// PostgreSQL-backed question pool.
#[derive(Debug, Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

fn infrastructure(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("question pool: {e}"))
}

fn map_question_row(row: &PgRow) -> Result<Question, DomainError> {
    let level: i16 = row.try_get("level").map_err(infrastructure)?;
    let level = u8::try_from(level).map_err(|_| {
        DomainError::Infrastructure(format!("question pool: invalid level {level}"))
    })?;
    Ok(Question {
        id: row.try_get("id").map_err(infrastructure)?,
        level,
        text: row.try_get("text").map_err(infrastructure)?,
        correct_answer: row.try_get("answer1").map_err(infrastructure)?,
        wrong_answers: [
            row.try_get("answer2").map_err(infrastructure)?,
            row.try_get("answer3").map_err(infrastructure)?,
            row.try_get("answer4").map_err(infrastructure)?,
        ],
    })
}

impl PgQuestionRepository {
    /// Creates a new `PgQuestionRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts `questions` in one transaction, skipping ids already stored.
    /// Returns how many rows were inserted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the database rejects the write.
    pub async fn upsert_questions(&self, questions: &[Question]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;
        let mut inserted = 0;
        for question in questions {
            let [answer2, answer3, answer4] = &question.wrong_answers;
            let result = sqlx::query(
                r"
                INSERT INTO questions (id, level, text, answer1, answer2, answer3, answer4)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO NOTHING
                ",
            )
            .bind(question.id)
            .bind(i16::from(question.level))
            .bind(&question.text)
            .bind(&question.correct_answer)
            .bind(answer2)
            .bind(answer3)
            .bind(answer4)
            .execute(&mut *tx)
            .await
            .map_err(infrastructure)?;
            inserted += result.rows_affected();
        }
        tx.commit().await.map_err(infrastructure)?;

        info!(
            submitted = questions.len(),
            inserted, "questions stored"
        );
        Ok(inserted)
    }

    /// Number of stored questions per level, indexed by level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the query fails.
    pub async fn count_by_level(&self) -> Result<Vec<(u8, i64)>, DomainError> {
        let rows = sqlx::query(
            "SELECT level, COUNT(*) AS total FROM questions GROUP BY level ORDER BY level",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;

        rows.iter()
            .map(|row| {
                let level: i16 = row.try_get("level").map_err(infrastructure)?;
                let total: i64 = row.try_get("total").map_err(infrastructure)?;
                let level = u8::try_from(level).map_err(|_| {
                    DomainError::Infrastructure(format!("question pool: invalid level {level}"))
                })?;
                Ok((level, total))
            })
            .collect()
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn questions_for_level(&self, level: u8) -> Result<Vec<Question>, DomainError> {
        let rows = sqlx::query(
            r"
            SELECT id, level, text, answer1, answer2, answer3, answer4
            FROM questions
            WHERE level = $1
            ORDER BY id
            ",
        )
        .bind(i16::from(level))
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;

        rows.iter().map(map_question_row).collect()
    }
}
