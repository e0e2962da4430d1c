//! The shared table of persistent word records.

use std::path::Path;

use ahash::AHashMap;
use log::info;

use crate::error::Result;
use crate::lexicon::frequency_table::{read_frequency_table, write_frequency_table};
use crate::lexicon::word::Word;

/// Words with their frequencies and log-probabilities.
///
/// Log-probabilities are normalised by all the frequency mass the lexicon has
/// absorbed: seed frequencies plus every substring the learner counted.
#[derive(Debug, Clone, Default)]
pub struct FrequencyLexicon {
    words: AHashMap<String, Word>,
    /// Sum of seed dictionary frequencies.
    seed_mass: u64,
    /// Substrings counted by learner epochs that were flushed into this lexicon.
    corpus_mass: u64,
}

impl FrequencyLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from seed `(word, frequency)` entries.
    ///
    /// Repeated words accumulate their frequencies.
    pub fn from_seed_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut lexicon = FrequencyLexicon::new();
        for (word, frequency) in entries {
            lexicon.words.entry(word.into()).or_default().base_freq += frequency;
            lexicon.seed_mass += frequency;
        }
        lexicon.recompute_log_probs();
        lexicon
    }

    /// Load a seed dictionary from a frequency-table file.
    pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<Self> {
        let entries = read_frequency_table(path.as_ref())?;
        let lexicon = Self::from_seed_entries(entries);
        info!(
            "loaded {} seed words from {}",
            lexicon.len(),
            path.as_ref().display()
        );
        Ok(lexicon)
    }

    /// Look up a word.
    pub fn get(&self, word: &str) -> Option<&Word> {
        self.words.get(word)
    }

    /// Whether `word` is known.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Combined frequency of `word`, `0` when unknown.
    pub fn frequency(&self, word: &str) -> u64 {
        self.words.get(word).map(Word::frequency).unwrap_or(0)
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over all words in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Word)> {
        self.words.iter().map(|(word, record)| (word.as_str(), record))
    }

    /// The positive denominator used for log-probabilities.
    pub fn normalizer(&self) -> f64 {
        (self.seed_mass + self.corpus_mass).max(1) as f64
    }

    /// Account for the substrings counted by one flushed epoch.
    pub fn add_corpus_mass(&mut self, mass: u64) {
        self.corpus_mass += mass;
    }

    /// Merge one epoch's frequency for a promoted word.
    ///
    /// Bumps `valid_epoch_count` and rescores the word against the current
    /// normalizer.
    pub fn promote(&mut self, word: &str, frequency: u64) -> &Word {
        let normalizer = self.normalizer();
        let record = self.words.entry(word.to_string()).or_default();
        record.total_freq += frequency;
        record.valid_epoch_count += 1;
        record.update_log_prob(normalizer);
        record
    }

    /// Rescore every word against the current normalizer.
    pub fn recompute_log_probs(&mut self) {
        let normalizer = self.normalizer();
        for record in self.words.values_mut() {
            record.update_log_prob(normalizer);
        }
    }

    /// Fold a lexicon learned on another shard into this one.
    ///
    /// Learned frequencies, epoch counts and corpus mass add up. Shards are
    /// expected to start from the same seed dictionary, so seed frequencies
    /// take the larger of the two values.
    pub fn merge(&mut self, other: &FrequencyLexicon) {
        for (word, theirs) in &other.words {
            let ours = self.words.entry(word.clone()).or_default();
            ours.total_freq += theirs.total_freq;
            ours.base_freq = ours.base_freq.max(theirs.base_freq);
            ours.valid_epoch_count += theirs.valid_epoch_count;
        }
        self.seed_mass = self.seed_mass.max(other.seed_mass);
        self.corpus_mass += other.corpus_mass;
        self.recompute_log_probs();
    }

    /// Established words with their frequencies, sorted by word.
    pub fn established_words(&self, epoch_id: u64) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .words
            .iter()
            .filter(|(_, record)| record.is_established(epoch_id))
            .map(|(word, record)| (word.clone(), record.frequency()))
            .collect();
        entries.sort();
        entries
    }

    /// Every word with its frequency, sorted by word.
    pub fn to_frequency_table(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .words
            .iter()
            .map(|(word, record)| (word.clone(), record.frequency()))
            .collect();
        entries.sort();
        entries
    }

    /// Write every word to a frequency-table file.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        write_frequency_table(path, self.to_frequency_table())
    }
}
