//! Prize ladder.

/// Number of questions on a game's ladder.
pub const LADDER_LEN: usize = millionaire_catalog::question::LEVEL_COUNT as usize;

/// Prize for each cleared level: `PRIZES[n]` is paid once question `n` has
/// been answered correctly.
pub const PRIZES: [u64; LADDER_LEN] = [
    100, 200, 300, 500, 1_000, 2_000, 4_000, 8_000, 16_000, 32_000, 64_000, 125_000, 250_000,
    500_000, 1_000_000,
];

/// Checkpoint levels whose prize is kept once reached.
pub const FIREPROOF_LEVELS: [usize; 3] = [4, 9, 14];

/// The prize a player keeps after clearing `level`: the prize of the highest
/// checkpoint at or below it, or 0 below the first checkpoint.
#[must_use]
pub fn fireproof_prize(level: usize) -> u64 {
    FIREPROOF_LEVELS
        .iter()
        .rev()
        .find(|&&checkpoint| checkpoint <= level)
        .map_or(0, |&checkpoint| PRIZES[checkpoint])
}

/// The prize for voluntarily leaving at `current_level`, i.e. for the last
/// cleared question. Zero before the first correct answer.
#[must_use]
pub fn cash_out_prize(current_level: usize) -> u64 {
    current_level
        .checked_sub(1)
        .and_then(|cleared| PRIZES.get(cleared))
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_prize_is_one_million() {
        assert_eq!(PRIZES[LADDER_LEN - 1], 1_000_000);
    }

    #[test]
    fn test_prizes_grow_strictly() {
        assert!(PRIZES.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_fireproof_prize_is_zero_below_first_checkpoint() {
        for level in 0..4 {
            assert_eq!(fireproof_prize(level), 0, "level {level}");
        }
    }

    #[test]
    fn test_fireproof_prize_keeps_highest_reached_checkpoint() {
        assert_eq!(fireproof_prize(4), 1_000);
        assert_eq!(fireproof_prize(5), 1_000);
        assert_eq!(fireproof_prize(9), 32_000);
        assert_eq!(fireproof_prize(13), 32_000);
        assert_eq!(fireproof_prize(14), 1_000_000);
    }

    #[test]
    fn test_cash_out_prize_pays_last_cleared_level() {
        assert_eq!(cash_out_prize(0), 0);
        assert_eq!(cash_out_prize(1), PRIZES[0]);
        assert_eq!(cash_out_prize(10), 32_000);
        assert_eq!(cash_out_prize(LADDER_LEN), 1_000_000);
    }
}
