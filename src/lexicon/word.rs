//! The persistent lexicon entry.

use serde::{Deserialize, Serialize};

/// A word known to the lexicon, either learned or seeded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Word {
    /// Occurrences merged in from learner epochs.
    pub total_freq: u64,
    /// Frequency taken from a seed dictionary.
    pub base_freq: u64,
    /// Number of epochs in which the word was promoted.
    pub valid_epoch_count: u32,
    /// `ln((total_freq + base_freq) / normalizer)`; `0.0` until first scored.
    pub curr_log_prob: f64,
}

impl Word {
    /// A fresh, unscored word.
    pub fn new() -> Self {
        Self::default()
    }

    /// A word loaded from a seed dictionary.
    pub fn seeded(base_freq: u64) -> Self {
        Word {
            base_freq,
            ..Self::default()
        }
    }

    /// Combined learned and seeded frequency.
    pub fn frequency(&self) -> u64 {
        self.total_freq + self.base_freq
    }

    /// Recompute `curr_log_prob`. A non-positive normalizer is treated as 1.
    pub fn update_log_prob(&mut self, normalizer: f64) {
        let normalizer = if normalizer > 0.0 { normalizer } else { 1.0 };
        let frequency = self.frequency();
        if frequency > 0 {
            self.curr_log_prob = (frequency as f64 / normalizer).ln();
        }
    }

    /// Whether the word has a real probability or survived most epochs so far.
    pub fn is_established(&self, epoch_id: u64) -> bool {
        self.curr_log_prob < 0.0 || 2 * u64::from(self.valid_epoch_count) > epoch_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_prob() {
        let mut word = Word::seeded(10);
        word.total_freq = 15;
        word.update_log_prob(100.0);
        assert!((word.curr_log_prob - (0.25f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_log_prob_guards_normalizer() {
        let mut word = Word::seeded(1);
        word.update_log_prob(0.0);
        assert_eq!(word.curr_log_prob, 0.0);

        let mut empty = Word::new();
        empty.update_log_prob(10.0);
        assert_eq!(empty.curr_log_prob, 0.0);
    }

    #[test]
    fn test_established() {
        let mut word = Word::new();
        assert!(!word.is_established(1));

        word.valid_epoch_count = 1;
        assert!(word.is_established(1));
        assert!(!word.is_established(2));

        word.valid_epoch_count = 2;
        assert!(word.is_established(3));

        let mut scored = Word::seeded(3);
        scored.update_log_prob(10.0);
        assert!(scored.is_established(100));
    }
}
