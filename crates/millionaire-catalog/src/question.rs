//! Leveled quiz questions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::CatalogError;

/// Number of levels on the question ladder (levels `0..LEVEL_COUNT`).
pub const LEVEL_COUNT: u8 = 15;

/// A catalog question. The first answer is the correct one; the game shuffles
/// answer positions when it binds a question to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Content-derived identifier.
    pub id: Uuid,
    /// Ladder level, `0..LEVEL_COUNT`.
    pub level: u8,
    /// The question text.
    pub text: String,
    /// The correct answer.
    pub correct_answer: String,
    /// The three distractors.
    pub wrong_answers: [String; 3],
}

impl Question {
    /// Builds a validated question with an id derived from its content.
    ///
    /// Text and answers are trimmed. Two questions with the same level, text
    /// and answers always get the same id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the level is off the ladder, the text or an
    /// answer is blank, or two answers are identical.
    pub fn new(
        level: u8,
        text: &str,
        correct_answer: &str,
        wrong_answers: [&str; 3],
    ) -> Result<Self, CatalogError> {
        if level >= LEVEL_COUNT {
            return Err(CatalogError::LevelOutOfRange(level));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(CatalogError::EmptyText);
        }

        let answers = [
            correct_answer.trim(),
            wrong_answers[0].trim(),
            wrong_answers[1].trim(),
            wrong_answers[2].trim(),
        ];
        for (index, answer) in answers.iter().enumerate() {
            if answer.is_empty() {
                return Err(CatalogError::EmptyAnswer {
                    text: text.to_owned(),
                    index,
                });
            }
            if answers[..index].contains(answer) {
                return Err(CatalogError::DuplicateAnswer {
                    text: text.to_owned(),
                    answer: (*answer).to_owned(),
                });
            }
        }

        Ok(Self {
            id: content_id(level, text, &answers),
            level,
            text: text.to_owned(),
            correct_answer: answers[0].to_owned(),
            wrong_answers: [
                answers[1].to_owned(),
                answers[2].to_owned(),
                answers[3].to_owned(),
            ],
        })
    }

    /// All four answers, correct answer first.
    #[must_use]
    pub fn answers(&self) -> [&str; 4] {
        [
            self.correct_answer.as_str(),
            self.wrong_answers[0].as_str(),
            self.wrong_answers[1].as_str(),
            self.wrong_answers[2].as_str(),
        ]
    }
}

/// SHA-256 over the level and the unit-separated text and answers, truncated
/// to 128 bits.
fn content_id(level: u8, text: &str, answers: &[&str; 4]) -> Uuid {
    let mut hasher = Sha256::new();
    hasher.update([level]);
    hasher.update(text.as_bytes());
    for answer in answers {
        hasher.update([0x1f]);
        hasher.update(answer.as_bytes());
    }
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_keeps_correct_answer_first() {
        // Act
        let question = Question::new(3, "  Capital of France? ", " Paris ", ["Rome", "Oslo", "Bern"])
            .unwrap();

        // Assert
        assert_eq!(question.level, 3);
        assert_eq!(question.text, "Capital of France?");
        assert_eq!(question.answers(), ["Paris", "Rome", "Oslo", "Bern"]);
    }

    #[test]
    fn test_same_content_produces_same_id() {
        let a = Question::new(0, "2 + 2?", "4", ["3", "5", "22"]).unwrap();
        let b = Question::new(0, "2 + 2? ", "4", ["3", "5", "22"]).unwrap();
        let other_level = Question::new(1, "2 + 2?", "4", ["3", "5", "22"]).unwrap();

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, other_level.id);
    }

    #[test]
    fn test_level_outside_ladder_is_rejected() {
        let result = Question::new(LEVEL_COUNT, "Too hard?", "yes", ["no", "maybe", "never"]);

        assert!(matches!(result, Err(CatalogError::LevelOutOfRange(15))));
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let result = Question::new(0, "   ", "a", ["b", "c", "d"]);

        assert!(matches!(result, Err(CatalogError::EmptyText)));
    }

    #[test]
    fn test_blank_answer_is_rejected() {
        let result = Question::new(0, "Pick one", "a", ["b", " ", "d"]);

        match result {
            Err(CatalogError::EmptyAnswer { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected EmptyAnswer, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_answer_is_rejected() {
        let result = Question::new(0, "Pick one", "a", ["b", "a", "d"]);

        match result {
            Err(CatalogError::DuplicateAnswer { answer, .. }) => assert_eq!(answer, "a"),
            other => panic!("expected DuplicateAnswer, got {other:?}"),
        }
    }
}
