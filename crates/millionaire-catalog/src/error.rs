//! Catalog error types.

use thiserror::Error;

/// Errors raised while building or importing questions.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A question was assigned to a level outside the ladder.
    #[error("question level {0} is out of range (the ladder has 15 levels)")]
    LevelOutOfRange(u8),

    /// A question has no text.
    #[error("question text must not be empty")]
    EmptyText,

    /// An answer is blank.
    #[error("answer {index} of question {text:?} must not be empty")]
    EmptyAnswer {
        /// The question text.
        text: String,
        /// Position of the blank answer (0 is the correct one).
        index: usize,
    },

    /// Two answers of the same question are identical.
    #[error("question {text:?} has duplicate answer {answer:?}")]
    DuplicateAnswer {
        /// The question text.
        text: String,
        /// The repeated answer.
        answer: String,
    },

    /// The question pack is not valid YAML.
    #[error("invalid question pack: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
