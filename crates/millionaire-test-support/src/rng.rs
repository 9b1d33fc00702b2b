//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use millionaire_core::rng::DeterministicRng;

/// An RNG that always returns `min`. With it a new game takes the first candidate of every level
/// and places the correct answer under key `d`.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// An RNG that returns values from a predetermined sequence, then falls back
/// to `min` once the sequence is exhausted. Values are clamped into the
/// requested range.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let Some(&val) = self.values.get(self.index) else {
            return min;
        };
        self.index += 1;
        val.clamp(min, max)
    }
}
