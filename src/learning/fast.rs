//! Learner that keeps only per-epoch tables.

use ahash::AHashMap;
use log::info;

use crate::error::Result;
use crate::learning::config::LearnerConfig;
use crate::learning::stats::{WordStat, for_each_candidate, is_promotable};
use crate::learning::{Epoch, FlushReport, Learner};
use crate::lexicon::FrequencyLexicon;

/// Merges each epoch straight into the lexicon and forgets it.
///
/// Memory stays bounded by one epoch's candidates. Words that are rare
/// within every single epoch are never promoted, even if they add up across
/// epochs.
#[derive(Debug, Clone)]
pub struct FastLearner {
    config: LearnerConfig,
    lexicon: FrequencyLexicon,
    epoch: Epoch,
    table: AHashMap<String, WordStat>,
}

impl FastLearner {
    /// Create a learner with an empty lexicon.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        Self::with_lexicon(config, FrequencyLexicon::new())
    }

    /// Create a learner that promotes into `lexicon`.
    pub fn with_lexicon(config: LearnerConfig, lexicon: FrequencyLexicon) -> Result<Self> {
        config.validate()?;
        Ok(FastLearner {
            config,
            lexicon,
            epoch: Epoch::first(),
            table: AHashMap::new(),
        })
    }

    /// Candidates tracked in the open epoch.
    pub fn candidate_count(&self) -> usize {
        self.table.len()
    }
}

impl Learner for FastLearner {
    fn config(&self) -> &LearnerConfig {
        &self.config
    }

    fn feed(&mut self, sentence: &str) -> Option<FlushReport> {
        let epoch_id = self.epoch.id;
        let table = &mut self.table;
        let observed =
            for_each_candidate(sentence, self.config.max_word_length, |candidate, left, right| {
                match table.get_mut(candidate) {
                    Some(stat) => stat.observe(left, right),
                    None => {
                        let mut stat = WordStat::new(epoch_id);
                        stat.observe(left, right);
                        table.insert(candidate.to_string(), stat);
                    }
                }
            });

        self.epoch.observed += observed;
        self.epoch.sentences += 1;
        (self.epoch.sentences >= self.config.flush_interval).then(|| self.flush())
    }

    fn flush(&mut self) -> FlushReport {
        if self.epoch.sentences == 0 {
            return self.epoch.empty_report();
        }

        let total = self.epoch.observed;
        let table = &self.table;
        let lookup = |word: &str| table.get(word).map(|stat| stat.process_freq).unwrap_or(0);

        let mut promoted: Vec<(String, u64)> = table
            .iter()
            .filter(|(candidate, stat)| {
                is_promotable(candidate, stat, stat.process_freq, total, lookup, &self.config)
            })
            .map(|(candidate, stat)| (candidate.clone(), stat.process_freq))
            .collect();
        promoted.sort();

        self.lexicon.add_corpus_mass(total);
        for (word, frequency) in &promoted {
            self.lexicon.promote(word, *frequency);
        }

        let report = FlushReport {
            epoch_id: self.epoch.id,
            sentences: self.epoch.sentences,
            observed: total,
            candidates: self.table.len(),
            promoted: promoted.into_iter().map(|(word, _)| word).collect(),
        };
        info!(
            "fast learner flushed epoch {}: {} sentences, {} candidates, {} promoted",
            report.epoch_id,
            report.sentences,
            report.candidates,
            report.promoted.len()
        );

        self.table.clear();
        self.epoch.advance();
        report
    }

    fn epoch_id(&self) -> u64 {
        self.epoch.id
    }

    fn lexicon(&self) -> &FrequencyLexicon {
        &self.lexicon
    }

    fn take_lexicon(&mut self) -> FrequencyLexicon {
        std::mem::take(&mut self.lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> LearnerConfig {
        LearnerConfig {
            max_word_length: 3,
            flush_interval: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_auto_flush_advances_epoch() {
        let mut learner = FastLearner::new(small_config()).unwrap();
        assert_eq!(learner.epoch_id(), 1);

        assert!(learner.feed("abcd").is_none());
        assert_eq!(learner.candidate_count(), 9);

        let report = learner.feed("abce").unwrap();
        assert_eq!(report.epoch_id, 1);
        assert_eq!(report.sentences, 2);
        assert_eq!(report.observed, 18);
        assert_eq!(learner.epoch_id(), 2);
        assert_eq!(learner.candidate_count(), 0);
        assert_eq!(learner.lexicon().normalizer(), 18.0);
    }

    #[test]
    fn test_empty_flush_is_noop() {
        let mut learner = FastLearner::new(small_config()).unwrap();
        let report = learner.flush();
        assert_eq!(report.sentences, 0);
        assert!(report.promoted.is_empty());
        assert_eq!(learner.epoch_id(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = LearnerConfig {
            max_word_length: 0,
            ..Default::default()
        };
        assert!(FastLearner::new(config).is_err());
    }

    #[test]
    fn test_take_lexicon() {
        let seed = FrequencyLexicon::from_seed_entries(vec![("seed", 4)]);
        let mut learner = FastLearner::with_lexicon(small_config(), seed).unwrap();
        let lexicon = learner.take_lexicon();
        assert!(lexicon.contains("seed"));
        assert!(learner.lexicon().is_empty());
    }
}
