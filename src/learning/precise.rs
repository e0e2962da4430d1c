//! Learner that keeps every candidate for the whole pass.

use ahash::AHashMap;
use log::info;

use crate::error::Result;
use crate::learning::config::LearnerConfig;
use crate::learning::stats::{WordStat, for_each_candidate, is_promotable};
use crate::learning::{Epoch, FlushReport, Learner};
use crate::lexicon::FrequencyLexicon;

/// Tests cohesion on counts accumulated over every epoch so far.
///
/// One shared table holds a [`WordStat`] per candidate for the entire pass.
/// Its epoch-local fields are reset lazily the first time the candidate is
/// seen in a new epoch, while `total_freq` keeps growing, so words that
/// recur thinly across many epochs still reach the frequency floor.
/// Context entropy is always judged on the current epoch alone.
#[derive(Debug, Clone)]
pub struct PreciseLearner {
    config: LearnerConfig,
    lexicon: FrequencyLexicon,
    epoch: Epoch,
    stats: AHashMap<String, WordStat>,
    /// Substrings counted since the learner was created.
    pass_observed: u64,
}

impl PreciseLearner {
    /// Create a learner with an empty lexicon.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        Self::with_lexicon(config, FrequencyLexicon::new())
    }

    /// Create a learner that promotes into `lexicon`.
    pub fn with_lexicon(config: LearnerConfig, lexicon: FrequencyLexicon) -> Result<Self> {
        config.validate()?;
        Ok(PreciseLearner {
            config,
            lexicon,
            epoch: Epoch::first(),
            stats: AHashMap::new(),
            pass_observed: 0,
        })
    }

    /// Candidates tracked since the start of the pass.
    pub fn candidate_count(&self) -> usize {
        self.stats.len()
    }

    /// The statistics kept for `candidate`.
    pub fn stat(&self, candidate: &str) -> Option<&WordStat> {
        self.stats.get(candidate)
    }
}

impl Learner for PreciseLearner {
    fn config(&self) -> &LearnerConfig {
        &self.config
    }

    fn feed(&mut self, sentence: &str) -> Option<FlushReport> {
        let epoch_id = self.epoch.id;
        let stats = &mut self.stats;
        let observed =
            for_each_candidate(sentence, self.config.max_word_length, |candidate, left, right| {
                match stats.get_mut(candidate) {
                    Some(stat) => {
                        stat.refresh(epoch_id);
                        stat.observe(left, right);
                    }
                    None => {
                        let mut stat = WordStat::new(epoch_id);
                        stat.observe(left, right);
                        stats.insert(candidate.to_string(), stat);
                    }
                }
            });

        self.epoch.observed += observed;
        self.epoch.sentences += 1;
        self.pass_observed += observed;
        (self.epoch.sentences >= self.config.flush_interval).then(|| self.flush())
    }

    fn flush(&mut self) -> FlushReport {
        if self.epoch.sentences == 0 {
            return self.epoch.empty_report();
        }

        let epoch_id = self.epoch.id;
        let total = self.pass_observed;
        let stats = &self.stats;
        let lookup = |word: &str| stats.get(word).map(|stat| stat.total_freq).unwrap_or(0);

        let current: Vec<(&String, &WordStat)> = stats
            .iter()
            .filter(|(_, stat)| stat.epoch_id == epoch_id && stat.process_freq > 0)
            .collect();
        let candidates = current.len();

        let mut promoted: Vec<(String, u64)> = current
            .into_iter()
            .filter(|(candidate, stat)| {
                is_promotable(candidate, stat, stat.total_freq, total, lookup, &self.config)
            })
            .map(|(candidate, stat)| (candidate.clone(), stat.process_freq))
            .collect();
        promoted.sort();

        self.lexicon.add_corpus_mass(self.epoch.observed);
        for (word, frequency) in &promoted {
            self.lexicon.promote(word, *frequency);
        }

        let report = FlushReport {
            epoch_id,
            sentences: self.epoch.sentences,
            observed: self.epoch.observed,
            candidates,
            promoted: promoted.into_iter().map(|(word, _)| word).collect(),
        };
        info!(
            "precise learner flushed epoch {}: {} sentences, {} candidates, {} promoted, {} tracked",
            report.epoch_id,
            report.sentences,
            report.candidates,
            report.promoted.len(),
            self.stats.len()
        );

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
