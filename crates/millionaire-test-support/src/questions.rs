//! Test question pools.

use std::collections::BTreeMap;

use async_trait::async_trait;
use millionaire_catalog::question::{LEVEL_COUNT, Question};
use millionaire_catalog::repository::QuestionRepository;
use millionaire_core::error::DomainError;

/// Generates `per_level` distinct questions for every ladder level.
///
/// Question `n` of level `l` reads `"Level l question n?"` with the correct
/// answer `"right l.n"`.
///
/// # Panics
///
/// Never in practice: generated content always passes validation.
#[must_use]
pub fn generate_questions(per_level: usize) -> Vec<Question> {
    (0..LEVEL_COUNT)
        .flat_map(|level| {
            (0..per_level).map(move |n| {
                let wrong: Vec<String> = (1..=3).map(|k| format!("wrong {level}.{n}.{k}")).collect();
                Question::new(
                    level,
                    &format!("Level {level} question {n}?"),
                    &format!("right {level}.{n}"),
                    [wrong[0].as_str(), wrong[1].as_str(), wrong[2].as_str()],
                )
                .expect("generated questions are valid")
            })
        })
        .collect()
}

/// A question pool held in memory, grouped by level in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryQuestionRepository {
    by_level: BTreeMap<u8, Vec<Question>>,
}

impl InMemoryQuestionRepository {
    /// Create a pool from `questions`.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let mut by_level: BTreeMap<u8, Vec<Question>> = BTreeMap::new();
        for question in questions {
            by_level.entry(question.level).or_default().push(question);
        }
        Self { by_level }
    }

    /// Total number of questions in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_level.values().map(Vec::len).sum()
    }

    /// Whether the pool holds no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn questions_for_level(&self, level: u8) -> Result<Vec<Question>, DomainError> {
        Ok(self.by_level.get(&level).cloned().unwrap_or_default())
    }
}
