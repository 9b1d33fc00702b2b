//! YAML question packs.
//!
//! A pack is a flat list of questions:
//!
//! ```yaml
//! questions:
//!   - level: 0
//!     text: "How many legs does a spider have?"
//!     correct: "8"
//!     wrong: ["6", "10", "12"]
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::question::{LEVEL_COUNT, Question};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionPack {
    questions: Vec<PackEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackEntry {
    level: u8,
    text: String,
    correct: String,
    wrong: [String; 3],
}

/// Parses and validates a YAML question pack.
///
/// Entries that are exact duplicates of an earlier entry are dropped.
///
/// # Errors
///
/// Returns `CatalogError::Yaml` for malformed YAML and the validation errors
/// of [`Question::new`] for invalid entries.
pub fn parse_question_pack(source: &str) -> Result<Vec<Question>, CatalogError> {
    let pack: QuestionPack = serde_yaml::from_str(source)?;

    let mut seen = HashSet::new();
    let mut questions = Vec::with_capacity(pack.questions.len());
    for entry in &pack.questions {
        let question = Question::new(
            entry.level,
            &entry.text,
            &entry.correct,
            [
                entry.wrong[0].as_str(),
                entry.wrong[1].as_str(),
                entry.wrong[2].as_str(),
            ],
        )?;
        if seen.insert(question.id) {
            questions.push(question);
        }
    }
    Ok(questions)
}

/// Levels of the ladder with no question in `questions`.
#[must_use]
pub fn missing_levels(questions: &[Question]) -> Vec<u8> {
    let covered: HashSet<u8> = questions.iter().map(|q| q.level).collect();
    (0..LEVEL_COUNT)
        .filter(|level| !covered.contains(level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK: &str = r#"
questions:
  - level: 0
    text: "How many legs does a spider have?"
    correct: "8"
    wrong: ["6", "10", "12"]
  - level: 1
    text: "Which planet is known as the red planet?"
    correct: "Mars"
    wrong: ["Venus", "Jupiter", "Mercury"]
  - level: 0
    text: "How many legs does a spider have?"
    correct: "8"
    wrong: ["6", "10", "12"]
"#;

    #[test]
    fn test_parse_question_pack_builds_questions_and_drops_duplicates() {
        // Act
        let questions = parse_question_pack(PACK).unwrap();

        // Assert
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].level, 0);
        assert_eq!(questions[0].correct_answer, "8");
        assert_eq!(questions[1].text, "Which planet is known as the red planet?");
        assert_eq!(questions[1].wrong_answers[2], "Mercury");
    }

    #[test]
    fn test_parse_question_pack_rejects_invalid_entry() {
        let pack = r#"
questions:
  - level: 20
    text: "Off the ladder"
    correct: "a"
    wrong: ["b", "c", "d"]
"#;

        let result = parse_question_pack(pack);

        assert!(matches!(result, Err(CatalogError::LevelOutOfRange(20))));
    }

    #[test]
    fn test_parse_question_pack_rejects_wrong_distractor_count() {
        let pack = r#"
questions:
  - level: 2
    text: "Only two distractors"
    correct: "a"
    wrong: ["b", "c"]
"#;

        let result = parse_question_pack(pack);

        assert!(matches!(result, Err(CatalogError::Yaml(_))));
    }

    #[test]
    fn test_missing_levels_lists_uncovered_levels() {
        let questions = parse_question_pack(PACK).unwrap();

        let missing = missing_levels(&questions);

        assert_eq!(missing, (2..LEVEL_COUNT).collect::<Vec<_>>());
    }
}
