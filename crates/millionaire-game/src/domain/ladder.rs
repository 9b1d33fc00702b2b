//! Question ladder: the fifteen questions bound to one game.

use std::fmt;
use std::str::FromStr;

use millionaire_catalog::question::{LEVEL_COUNT, Question};
use millionaire_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::prizes::LADDER_LEN;
use crate::error::GameError;

/// Position of an answer variant on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKey {
    /// First variant.
    A,
    /// Second variant.
    B,
    /// Third variant.
    C,
    /// Fourth variant.
    D,
}

impl AnswerKey {
    /// All keys in display order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// The key as a lowercase letter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            _ => Err(()),
        }
    }
}

/// One answer variant of a bound question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerVariant {
    /// Key the player submits to pick this variant.
    pub key: AnswerKey,
    /// Answer text.
    pub text: String,
}

/// A catalog question bound to a game, with its answers in shuffled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameQuestion {
    /// The catalog question this was drawn from.
    pub question_id: Uuid,
    /// Ladder level.
    pub level: u8,
    /// Question text.
    pub text: String,
    /// Variants keyed `a`..`d`.
    pub variants: Vec<AnswerVariant>,
    /// Key of the correct variant.
    pub correct_answer_key: AnswerKey,
}

impl GameQuestion {
    /// Binds `question`, permuting its answers with `rng`.
    pub fn bind(question: &Question, rng: &mut dyn DeterministicRng) -> Self {
        // Index 0 is the correct answer; Fisher-Yates over the four slots.
        let mut order: [usize; 4] = [0, 1, 2, 3];
        for i in (1..order.len()).rev() {
            #[allow(clippy::cast_possible_truncation)]
            let j = rng.next_u32_range(0, i as u32) as usize;
            order.swap(i, j);
        }

        let answers = question.answers();
        let variants: Vec<AnswerVariant> = AnswerKey::ALL
            .iter()
            .zip(order)
            .map(|(&key, source)| AnswerVariant {
                key,
                text: answers[source].to_owned(),
            })
            .collect();
        let correct_answer_key = AnswerKey::ALL[order
            .iter()
            .position(|&source| source == 0)
            .unwrap_or_default()];

        Self {
            question_id: question.id,
            level: question.level,
            text: question.text.clone(),
            variants,
            correct_answer_key,
        }
    }

    /// Whether `answer_key` names the correct variant. Keys are matched
    /// case-insensitively; anything that is not `a`..`d` is wrong.
    #[must_use]
    pub fn is_correct(&self, answer_key: &str) -> bool {
        answer_key
            .parse::<AnswerKey>()
            .is_ok_and(|key| key == self.correct_answer_key)
    }
}

/// Draws one question per level from `candidates_by_level` (indexed by level)
/// and binds them in ascending level order.
///
/// # Errors
///
/// Returns `GameError::InsufficientQuestions` for the first level without
/// candidates.
pub fn draw_ladder(
    candidates_by_level: &[Vec<Question>],
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<GameQuestion>, GameError> {
    let mut ladder = Vec::with_capacity(LADDER_LEN);
    for level in 0..LEVEL_COUNT {
        let candidates = candidates_by_level
            .get(usize::from(level))
            .filter(|candidates| !candidates.is_empty())
            .ok_or(GameError::InsufficientQuestions { level })?;

        let last = candidates.len() - 1;
        let pick = rng.next_u32_range(0, u32::try_from(last).unwrap_or(u32::MAX)) as usize;
        ladder.push(GameQuestion::bind(&candidates[pick.min(last)], rng));
    }
    Ok(ladder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use millionaire_test_support::{MockRng, SequenceRng, generate_questions};

    fn candidates(per_level: usize) -> Vec<Vec<Question>> {
        let mut by_level = vec![Vec::new(); LADDER_LEN];
        for question in generate_questions(per_level) {
            by_level[usize::from(question.level)].push(question);
        }
        by_level
    }

    #[test]
    fn test_answer_key_parses_case_insensitively() {
        assert_eq!(" B ".parse::<AnswerKey>(), Ok(AnswerKey::B));
        assert_eq!("d".parse::<AnswerKey>(), Ok(AnswerKey::D));
        assert!("e".parse::<AnswerKey>().is_err());
        assert!("".parse::<AnswerKey>().is_err());
    }

    #[test]
    fn test_bind_with_minimum_rng_puts_correct_answer_last() {
        // Arrange
        let question = Question::new(0, "2 + 2?", "4", ["3", "5", "22"]).unwrap();

        // Act
        let bound = GameQuestion::bind(&question, &mut MockRng);

        // Assert
        assert_eq!(bound.correct_answer_key, AnswerKey::D);
        let texts: Vec<&str> = bound.variants.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, ["3", "5", "22", "4"]);
        let keys: Vec<AnswerKey> = bound.variants.iter().map(|v| v.key).collect();
        assert_eq!(keys, AnswerKey::ALL);
    }

    #[test]
    fn test_bind_keeps_correct_key_pointing_at_correct_text() {
        let question = Question::new(0, "2 + 2?", "4", ["3", "5", "22"]).unwrap();
        // Swaps: i=3 with 3, i=2 with 0, i=1 with 1 -> order [2, 1, 0, 3].
        let mut rng = SequenceRng::new(vec![3, 0, 1]);

        let bound = GameQuestion::bind(&question, &mut rng);

        assert_eq!(bound.correct_answer_key, AnswerKey::C);
        let correct = bound
            .variants
            .iter()
            .find(|v| v.key == bound.correct_answer_key)
            .unwrap();
        assert_eq!(correct.text, "4");
    }

    #[test]
    fn test_is_correct_rejects_other_and_unknown_keys() {
        let question = Question::new(0, "2 + 2?", "4", ["3", "5", "22"]).unwrap();
        let bound = GameQuestion::bind(&question, &mut MockRng);

        assert!(bound.is_correct("d"));
        assert!(bound.is_correct("D"));
        assert!(!bound.is_correct("a"));
        assert!(!bound.is_correct("zzz"));
    }

    #[test]
    fn test_draw_ladder_takes_one_question_per_level_in_order() {
        // Act
        let ladder = draw_ladder(&candidates(4), &mut MockRng).unwrap();

        // Assert
        assert_eq!(ladder.len(), LADDER_LEN);
        let levels: Vec<u8> = ladder.iter().map(|q| q.level).collect();
        assert_eq!(levels, (0..15).collect::<Vec<u8>>());
    }

    #[test]
    fn test_draw_ladder_uses_rng_to_pick_among_candidates() {
        // Arrange: pick candidate 2 on level 0, then identity shuffles.
        let pool = candidates(4);
        let mut rng = SequenceRng::new(vec![2, 3, 2, 1]);

        // Act
        let ladder = draw_ladder(&pool, &mut rng).unwrap();

        // Assert
        assert_eq!(ladder[0].question_id, pool[0][2].id);
        assert_eq!(ladder[0].correct_answer_key, AnswerKey::A);
        assert_eq!(ladder[1].question_id, pool[1][0].id);
    }

    #[test]
    fn test_draw_ladder_fails_on_empty_level() {
        let mut pool = candidates(2);
        pool[7].clear();

        let result = draw_ladder(&pool, &mut MockRng);

        match result {
            Err(GameError::InsufficientQuestions { level }) => assert_eq!(level, 7),
            other => panic!("expected InsufficientQuestions, got {other:?}"),
        }
    }

    #[test]
    fn test_draw_ladder_fails_when_levels_are_missing() {
        let pool = candidates(1)[..10].to_vec();

        let result = draw_ladder(&pool, &mut MockRng);

        assert!(matches!(
            result,
            Err(GameError::InsufficientQuestions { level: 10 })
        ));
    }
}
